//! Invocation adapter
//!
//! The only place that crosses into an externally supplied implementation.
//! Every failure the callee raises, panics included, is normalized here into
//! an [`InteropError`] carrying the textual invocation context.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};
use crate::error::{CallResult, Failure, FailureKind, InteropError, InteropResult};
use crate::native::{Native, NativeKind};

/// Largest argument count passed through the fixed-arity entry point.
pub const MAX_FIXED_ARITY: usize = 20;

/// An opaque external function.
pub trait Callable {
    fn name(&self) -> &str;

    /// Fixed-arity entry point.
    fn invoke(&self, args: &[Native]) -> CallResult;

    /// Variadic entry point: receives all arguments packed into one sequence.
    fn apply_to(&self, args: Native) -> CallResult {
        match args {
            Native::Vector(items) => self.invoke(&items),
            other => self.invoke(std::slice::from_ref(&other)),
        }
    }
}

/// A callable backed by a plain function over native arguments.
#[derive(Clone)]
pub struct NativeFn {
    name: String,
    body: fn(&[Native]) -> CallResult,
}

impl NativeFn {
    pub fn new(name: impl Into<String>, body: fn(&[Native]) -> CallResult) -> Self { NativeFn { name: name.into(), body } }
}

impl Callable for NativeFn {
    fn name(&self) -> &str { &self.name }
    fn invoke(&self, args: &[Native]) -> CallResult { (self.body)(args) }
}

impl std::fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "<native-fn {}>", self.name) }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn raw_call(f: &dyn Callable, args: &[Native]) -> CallResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        if args.len() <= MAX_FIXED_ARITY {
            f.invoke(args)
        } else {
            f.apply_to(Native::Vector(args.to_vec()))
        }
    }));
    outcome.unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(callee = f.name(), %message, "external call panicked");
        Err(Failure::panic(message))
    })
}

/// Calls `f`, passing any successful result through, nil included.
pub fn call_nullable(f: &dyn Callable, context: &str, args: &[Native]) -> InteropResult<Native> {
    debug!(callee = f.name(), arity = args.len(), "{}", context);
    raw_call(f, args).map_err(|source| InteropError::Call { context: context.to_string(), source })
}

pub fn call_non_null(f: &dyn Callable, context: &str, args: &[Native]) -> InteropResult<Native> {
    let result = call_nullable(f, context, args)?;
    if result.is_nil() {
        return Err(InteropError::UnexpectedNil { context: context.to_string() });
    }
    Ok(result)
}

fn check_kind(result: Native, expected: NativeKind, context: &str) -> InteropResult<Native> {
    if !result.kind().is_assignable_to(expected) {
        return Err(InteropError::KindMismatch {
            context: context.to_string(),
            expected,
            found: result.kind(),
            value: result.to_string(),
        });
    }
    Ok(result)
}

/// Like [`call_nullable`], additionally requiring a non-nil result to be of kind `expected`.
pub fn call_nullable_typed(f: &dyn Callable, context: &str, expected: NativeKind, args: &[Native]) -> InteropResult<Native> {
    let result = call_nullable(f, context, args)?;
    if result.is_nil() {
        return Ok(result);
    }
    check_kind(result, expected, context)
}

pub fn call_non_null_typed(f: &dyn Callable, context: &str, expected: NativeKind, args: &[Native]) -> InteropResult<Native> {
    let result = call_nullable(f, context, args)?;
    if result.is_nil() {
        return Err(InteropError::ExpectedNonNil { context: context.to_string(), expected });
    }
    check_kind(result, expected, context)
}

/// Succeeds only if `f` fails with a failure of kind `expected`.
pub fn expect_failure(f: &dyn Callable, context: &str, expected: FailureKind, args: &[Native]) -> InteropResult<Failure> {
    debug!(callee = f.name(), %expected, "expecting failure: {}", context);
    match raw_call(f, args) {
        Ok(value) => Err(InteropError::UnexpectedSuccess {
            context: context.to_string(),
            expected,
            value: value.to_string(),
        }),
        Err(failure) if failure.kind.is_a(expected) => Ok(failure),
        Err(failure) => Err(InteropError::WrongFailure {
            context: context.to_string(),
            expected,
            found: failure.kind,
            source: failure,
        }),
    }
}
