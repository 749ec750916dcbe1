//! Marshaling between reference tensors and native values

use lindiff_tensor::tensor::Tensor;
use crate::error::{InteropError, InteropResult};
use crate::native::{Native, NativeElement};

/// A marshaled value together with its textual rendering, used only for
/// diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated<V> {
    pub value: V,
    pub context: String,
}

pub fn to_native<T: NativeElement>(tensor: &Tensor<T>) -> Annotated<Native> {
    match tensor {
        Tensor::Scalar(v) => {
            let value = v.to_native();
            let context = value.to_string();
            Annotated { value, context }
        }
        Tensor::Vector(items) => {
            let parts: Vec<Annotated<Native>> = items.iter().map(to_native).collect();
            let context = format!("[{}]", parts.iter().map(|p| p.context.as_str()).collect::<Vec<_>>().join(" "));
            Annotated { value: Native::Vector(parts.into_iter().map(|p| p.value).collect()), context }
        }
    }
}

/// Converts a native result back into a tensor. Anything other than a number
/// of `T`'s kind or a sequence of such is rejected with `context`.
pub fn from_native<T: NativeElement>(value: &Native, context: &str) -> InteropResult<Tensor<T>> {
    match value {
        Native::Vector(items) => items
            .iter()
            .map(|item| from_native(item, context))
            .collect::<InteropResult<Vec<_>>>()
            .map(Tensor::Vector),
        Native::Nil => Err(InteropError::NilResult { context: context.to_string() }),
        other => T::from_native(other).map(Tensor::Scalar).ok_or_else(|| InteropError::UnexpectedValue {
            context: context.to_string(),
            expected: T::KIND,
            found: other.kind(),
        }),
    }
}

/// Marshals call arguments and renders the call as `(name arg1 arg2 ...)`.
pub fn annotate_call<T: NativeElement>(name: &str, args: &[Tensor<T>]) -> Annotated<Vec<Native>> {
    let parts: Vec<Annotated<Native>> = args.iter().map(to_native).collect();
    let mut context = format!("({}", name);
    for part in &parts {
        context.push(' ');
        context.push_str(&part.context);
    }
    context.push(')');
    Annotated { value: parts.into_iter().map(|p| p.value).collect(), context }
}
