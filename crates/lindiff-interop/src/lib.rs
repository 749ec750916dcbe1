//! # lindiff-interop - Boundary between the reference algebra and an
//! externally supplied implementation
//!
//! Tensors are marshaled into [`Native`](native::Native) values, handed to an
//! opaque [`Callable`](call::Callable), and the result is marshaled back.

pub mod native;
pub mod error;
pub mod call;
pub mod namespace;
pub mod marshal;

pub mod prelude {
    pub use crate::native::{Native, NativeElement, NativeKind};
    pub use crate::error::{CallResult, Failure, FailureKind, InteropError, InteropResult};
    pub use crate::call::{
        call_non_null, call_non_null_typed, call_nullable, call_nullable_typed, expect_failure, Callable, NativeFn,
        MAX_FIXED_ARITY,
    };
    pub use crate::namespace::{Namespace, Registry};
    pub use crate::marshal::{annotate_call, from_native, to_native, Annotated};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use lindiff_tensor::prelude::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::cell::Cell;

    fn constant(args: &[Native]) -> CallResult { Ok(Native::long(args.len() as i64)) }
    fn nil(_: &[Native]) -> CallResult { Ok(Native::Nil) }
    fn text(_: &[Native]) -> CallResult { Ok(Native::str("oops")) }
    fn contract(_: &[Native]) -> CallResult { Err(Failure::assertion("shape")) }
    fn precondition(_: &[Native]) -> CallResult { Err(Failure::precondition("(vector? a)")) }
    fn typed(_: &[Native]) -> CallResult { Err(Failure::type_error("not a number")) }
    fn panicking(_: &[Native]) -> CallResult { panic!("index out of range") }

    const DEPTH_LIMIT: usize = 8;

    /// Nesting depth of the arguments, refusing to descend past `DEPTH_LIMIT`.
    fn depth(args: &[Native]) -> CallResult {
        fn walk(value: &Native, level: usize) -> Result<i64, Failure> {
            if level > DEPTH_LIMIT {
                return Err(Failure::resource_exhausted(format!("depth limit {} exceeded", DEPTH_LIMIT)));
            }
            match value {
                Native::Vector(items) => items.iter().map(|item| walk(item, level + 1)).try_fold(level as i64 + 1, |acc, d| d.map(|d| acc.max(d))),
                _ => Ok(level as i64),
            }
        }
        args.iter().map(|arg| walk(arg, 0)).try_fold(0, |acc, d| d.map(|d| acc.max(d))).map(Native::long)
    }

    fn nested(levels: usize) -> Native { (0..levels).fold(Native::long(0), |inner, _| Native::vector(vec![inner])) }

    fn f(body: fn(&[Native]) -> CallResult) -> NativeFn { NativeFn::new("f", body) }

    /// Records which entry point the adapter used.
    struct Spy { fixed: Cell<usize>, spread: Cell<usize> }

    impl Callable for Spy {
        fn name(&self) -> &str { "spy" }
        fn invoke(&self, args: &[Native]) -> CallResult { self.fixed.set(self.fixed.get() + 1); Ok(Native::long(args.len() as i64)) }
        fn apply_to(&self, args: Native) -> CallResult {
            self.spread.set(self.spread.get() + 1);
            Ok(Native::long(args.as_slice().map_or(0, <[Native]>::len) as i64))
        }
    }

    #[test] fn test_kind_assignability() { assert!(NativeKind::Long.is_assignable_to(NativeKind::Number)); assert!(NativeKind::Str.is_assignable_to(NativeKind::Any)); assert!(!NativeKind::Long.is_assignable_to(NativeKind::Double)); }
    #[test] fn test_failure_assignability() { assert!(FailureKind::Precondition.is_a(FailureKind::Assertion)); assert!(FailureKind::Panic.is_a(FailureKind::Error)); assert!(!FailureKind::Type.is_a(FailureKind::Assertion)); assert!(!FailureKind::Assertion.is_a(FailureKind::Precondition)); }
    #[test] fn test_native_display() { assert_eq!(Native::vector(vec![Native::double(1.0), Native::long(2), Native::Nil]).to_string(), "[1.0 2 nil]"); }

    #[test] fn test_call_nullable_passes_nil() { assert_eq!(call_nullable(&f(nil), "(f)", &[]), Ok(Native::Nil)); }
    #[test] fn test_call_non_null_rejects_nil() { assert_eq!(call_non_null(&f(nil), "(f)", &[]), Err(InteropError::UnexpectedNil { context: "(f)".into() })); }
    #[test] fn test_call_wraps_failure() { let err = call_nullable(&f(contract), "(f 1)", &[Native::long(1)]).unwrap_err(); assert_eq!(err.to_string(), "No error expected in (f 1)"); assert!(matches!(err, InteropError::Call { source: Failure { kind: FailureKind::Assertion, .. }, .. })); }
    #[test] fn test_call_catches_panic() { assert!(matches!(call_nullable(&f(panicking), "(f)", &[]), Err(InteropError::Call { source: Failure { kind: FailureKind::Panic, .. }, .. }))); }
    #[test] fn test_typed_accepts_subkind() { assert_eq!(call_non_null_typed(&f(constant), "(f)", NativeKind::Number, &[]), Ok(Native::long(0))); }
    #[test] fn test_typed_rejects_kind() { assert!(matches!(call_nullable_typed(&f(text), "(f)", NativeKind::Number, &[]), Err(InteropError::KindMismatch { found: NativeKind::Str, .. }))); }
    #[test] fn test_nullable_typed_passes_nil() { assert_eq!(call_nullable_typed(&f(nil), "(f)", NativeKind::Vector, &[]), Ok(Native::Nil)); }
    #[test] fn test_non_null_typed_rejects_nil() { assert!(matches!(call_non_null_typed(&f(nil), "(f)", NativeKind::Number, &[]), Err(InteropError::ExpectedNonNil { .. }))); }

    #[test] fn test_expect_failure_matches() { assert_eq!(expect_failure(&f(contract), "(f)", FailureKind::Assertion, &[]).map(|e| e.kind), Ok(FailureKind::Assertion)); }
    #[test] fn test_expect_failure_accepts_subkind() { assert!(expect_failure(&f(precondition), "(f)", FailureKind::Assertion, &[]).is_ok()); }
    #[test] fn test_expect_failure_wrong_kind() { assert!(matches!(expect_failure(&f(typed), "(f)", FailureKind::Assertion, &[]), Err(InteropError::WrongFailure { found: FailureKind::Type, .. }))); }
    #[test] fn test_expect_failure_panic_is_wrong_kind() { assert!(matches!(expect_failure(&f(panicking), "(f)", FailureKind::Assertion, &[]), Err(InteropError::WrongFailure { found: FailureKind::Panic, .. }))); }
    #[test] fn test_depth_within_limit() { assert_eq!(call_nullable(&f(depth), "(f)", &[nested(3)]), Ok(Native::long(3))); }
    #[test] fn test_depth_limit_is_error_not_assertion() {
        let arg = [nested(20)];
        assert!(matches!(call_nullable(&f(depth), "(f)", &arg), Err(InteropError::Call { source: Failure { kind: FailureKind::ResourceExhausted, .. }, .. })));
        assert!(expect_failure(&f(depth), "(f)", FailureKind::Error, &arg).is_ok());
        assert!(matches!(expect_failure(&f(depth), "(f)", FailureKind::Assertion, &arg), Err(InteropError::WrongFailure { found: FailureKind::ResourceExhausted, .. })));
    }
    #[test] fn test_expect_failure_success() { let err = expect_failure(&f(constant), "(f 1)", FailureKind::Assertion, &[Native::long(1)]).unwrap_err(); assert_eq!(err.to_string(), "Expected error of type AssertionError, found 1 in (f 1)"); }

    #[test]
    fn test_fixed_arity_cutoff() {
        let spy = Spy { fixed: Cell::new(0), spread: Cell::new(0) };
        let args = vec![Native::long(0); MAX_FIXED_ARITY];
        assert_eq!(call_nullable(&spy, "(spy)", &args), Ok(Native::long(MAX_FIXED_ARITY as i64)));
        assert_eq!((spy.fixed.get(), spy.spread.get()), (1, 0));
        let args = vec![Native::long(0); MAX_FIXED_ARITY + 1];
        assert_eq!(call_nullable(&spy, "(spy)", &args), Ok(Native::long(MAX_FIXED_ARITY as i64 + 1)));
        assert_eq!((spy.fixed.get(), spy.spread.get()), (1, 1));
    }

    #[test] fn test_default_apply_to_spreads() { assert_eq!(call_nullable(&f(constant), "(f)", &vec![Native::Nil; 25]), Ok(Native::long(25))); }

    #[test]
    fn test_namespace_resolution() {
        let mut ns = Namespace::new("demo");
        ns.define_fn("count", constant);
        assert_eq!(ns.var("count").unwrap().invoke(&[Native::Nil]), Ok(Native::long(1)));
        assert!(matches!(ns.var("missing"), Err(InteropError::Unresolved { .. })));
        assert_eq!(ns.names().collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn test_registry_load() {
        let mut registry = Registry::new();
        registry.register("demo", || Namespace::new("demo"));
        assert_eq!(registry.load("demo").unwrap().name(), "demo");
        assert!(matches!(registry.load("nope"), Err(InteropError::UnknownNamespace(_))));
    }

    #[test]
    fn test_to_native_context() {
        let m = Tensor::from_rows(&[&[1.0, 2.5], &[-3.0, 4.0]]);
        let annotated = to_native(&m);
        assert_eq!(annotated.context, "[[1.0 2.5] [-3.0 4.0]]");
        assert_eq!(annotated.value.to_string(), annotated.context);
    }

    #[test]
    fn test_annotate_call() {
        let call = annotate_call("v+", &[Tensor::from_slice(&[1.0, 2.0]), Tensor::from_slice(&[3.0, 4.0])]);
        assert_eq!(call.context, "(v+ [1.0 2.0] [3.0 4.0])");
        assert_eq!(call.value.len(), 2);
        assert_eq!(annotate_call::<f64>("dot", &[]).context, "(dot)");
    }

    #[test] fn test_from_native_nil() { assert_eq!(from_native::<f64>(&Native::Nil, "(f)"), Err(InteropError::NilResult { context: "(f)".into() })); }
    #[test] fn test_from_native_wrong_number_kind() { assert!(matches!(from_native::<f64>(&Native::vector(vec![Native::long(1)]), "(f)"), Err(InteropError::UnexpectedValue { found: NativeKind::Long, .. }))); }
    #[test] fn test_from_native_string() { let err = from_native::<f64>(&Native::str("x"), "(v+ [1.0])").unwrap_err(); assert_eq!(err.to_string(), "Returned object of type String [expected Double or Vector] from (v+ [1.0])"); }
    #[test] fn test_from_native_long_elements() { assert_eq!(from_native::<i64>(&Native::vector(vec![Native::long(3)]), "(f)"), Ok(Tensor::from_slice(&[3i64]))); }

    fn tensor_strategy() -> impl Strategy<Value = Tensor<f64>> {
        let leaf = (-10_000i64..=10_000).prop_map(|n| Tensor::scalar(n as f64 / 100.0));
        leaf.prop_recursive(3, 64, 6, |inner| prop::collection::vec(inner, 0..6).prop_map(Tensor::vector))
    }

    proptest! {
        #[test]
        fn prop_round_trip(t in tensor_strategy()) {
            let native = to_native(&t);
            prop_assert_eq!(from_native::<f64>(&native.value, &native.context).unwrap(), t);
        }
    }
}
