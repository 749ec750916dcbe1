//! Native runtime values
//!
//! The representation an external implementation receives and returns:
//! numbers, ordered sequences, and the handful of other kinds a dynamically
//! typed callee may hand back by mistake.

use std::fmt;
use ordered_float::OrderedFloat;

#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    Nil,
    Bool(bool),
    Long(i64),
    Double(OrderedFloat<f64>),
    Str(String),
    Vector(Vec<Native>),
}

/// Runtime kind of a native value. `Number` and `Any` are abstract: no value
/// has them as its own kind, but concrete kinds are assignable to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Any,
    Nil,
    Bool,
    Number,
    Long,
    Double,
    Str,
    Vector,
}

impl NativeKind {
    pub fn is_assignable_to(self, expected: NativeKind) -> bool {
        match expected {
            NativeKind::Any => true,
            NativeKind::Number => matches!(self, NativeKind::Number | NativeKind::Long | NativeKind::Double),
            _ => self == expected,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NativeKind::Any => "Any", NativeKind::Nil => "Nil", NativeKind::Bool => "Bool",
            NativeKind::Number => "Number", NativeKind::Long => "Long", NativeKind::Double => "Double",
            NativeKind::Str => "String", NativeKind::Vector => "Vector",
        }
    }
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl Native {
    pub fn double(value: f64) -> Self { Native::Double(OrderedFloat(value)) }
    pub fn long(value: i64) -> Self { Native::Long(value) }
    pub fn str(value: impl Into<String>) -> Self { Native::Str(value.into()) }
    pub fn vector(items: Vec<Native>) -> Self { Native::Vector(items) }

    pub fn kind(&self) -> NativeKind {
        match self {
            Native::Nil => NativeKind::Nil, Native::Bool(_) => NativeKind::Bool,
            Native::Long(_) => NativeKind::Long, Native::Double(_) => NativeKind::Double,
            Native::Str(_) => NativeKind::Str, Native::Vector(_) => NativeKind::Vector,
        }
    }

    pub fn is_nil(&self) -> bool { matches!(self, Native::Nil) }
    pub fn as_f64(&self) -> Option<f64> { match self { Native::Double(v) => Some(v.0), Native::Long(n) => Some(*n as f64), _ => None } }
    pub fn as_slice(&self) -> Option<&[Native]> { match self { Native::Vector(items) => Some(items), _ => None } }
}

impl fmt::Display for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Native::Nil => write!(f, "nil"),
            Native::Bool(b) => write!(f, "{}", b),
            Native::Long(n) => write!(f, "{}", n),
            Native::Double(x) => write!(f, "{:?}", x.0),
            Native::Str(s) => write!(f, "{:?}", s),
            Native::Vector(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 { write!(f, " ")?; }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A tensor element type with exactly one native numeric counterpart.
pub trait NativeElement: lindiff_tensor::tensor::Element {
    const KIND: NativeKind;
    fn to_native(self) -> Native;
    fn from_native(value: &Native) -> Option<Self>;
}

impl NativeElement for f64 {
    const KIND: NativeKind = NativeKind::Double;
    fn to_native(self) -> Native { Native::double(self) }
    fn from_native(value: &Native) -> Option<Self> { match value { Native::Double(v) => Some(v.0), _ => None } }
}

impl NativeElement for i64 {
    const KIND: NativeKind = NativeKind::Long;
    fn to_native(self) -> Native { Native::Long(self) }
    fn from_native(value: &Native) -> Option<Self> { match value { Native::Long(n) => Some(*n), _ => None } }
}
