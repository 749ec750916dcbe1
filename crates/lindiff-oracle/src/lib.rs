//! # lindiff-oracle - Differential test driver
//!
//! Pairs every reference operation with the operation of the same name in an
//! external namespace, feeds both seeded random inputs and compares results
//! exactly, then checks that shape violations are rejected with an assertion
//! failure.

pub mod error;
pub mod config;
pub mod gen;
pub mod tester;
pub mod suite;

pub mod prelude {
    pub use crate::error::{OracleError, OracleResult};
    pub use crate::config::{OracleConfig, DEFAULT_SEED};
    pub use crate::gen::TensorGen;
    pub use crate::tester::FunctionTester;
    pub use crate::suite::{LinearSuite, OperationReport, SuiteReport};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use lindiff_interop::prelude::*;
    use lindiff_tensor::prelude::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::rc::Rc;

    fn v(values: &[f64]) -> Tensor<f64> { Tensor::from_slice(values) }
    fn external(body: fn(&[Native]) -> CallResult) -> Rc<dyn Callable> { Rc::new(NativeFn::new("v+", body)) }
    fn add_tester(body: fn(&[Native]) -> CallResult) -> FunctionTester<f64> {
        FunctionTester::new("v+", |t| vector_comp_wise(t, OperatorPair::add()), external(body))
    }

    fn sum(args: &[Native]) -> CallResult { lindiff_linear::ops::v_add(args) }
    fn first(args: &[Native]) -> CallResult { Ok(args.first().cloned().unwrap_or(Native::Nil)) }
    fn reject(_: &[Native]) -> CallResult { Err(Failure::precondition("(vector? %1)")) }

    #[test] fn test_default_config() { let c = OracleConfig::default(); assert_eq!((c.seed, c.namespace.as_str(), c.counts.clone()), (DEFAULT_SEED, "linear", vec![3, 4, 5])); }
    #[test] fn test_config_partial_json() { let c = OracleConfig::from_json(r#"{"seed": 7, "counts": [2]}"#).unwrap(); assert_eq!((c.seed, c.counts, c.warmup_counts), (7, vec![2], vec![2, 1])); }
    #[test] fn test_config_zero_count() { assert!(matches!(OracleConfig::from_json(r#"{"counts": [0]}"#), Err(OracleError::Config(_)))); }
    #[test] fn test_config_bad_json() { assert!(matches!(OracleConfig::from_json("{"), Err(OracleError::Config(_)))); }
    #[test] fn test_config_missing_file() { assert!(matches!(OracleConfig::from_file(std::path::Path::new("/nonexistent/lindiff.json")), Err(OracleError::Config(_)))); }

    #[test] fn test_gen_deterministic() { let (mut a, mut b) = (TensorGen::new(1), TensorGen::new(1)); assert_eq!(a.matrix(3, 4), b.matrix(3, 4)); }
    #[test] fn test_gen_shapes() { let mut g = TensorGen::new(1); assert_eq!(g.shaped(&[&[], &[3], &[2, 3]]).iter().map(|t| t.shape().unwrap()).collect::<Vec<_>>(), vec![vec![], vec![3], vec![2, 3]]); }
    #[test] fn test_gen_with_scalars() { let mut g = TensorGen::new(1); let args = g.with_scalars(&[2], 2); assert_eq!(args.iter().map(Tensor::rank).collect::<Vec<_>>(), vec![1, 0, 0]); }

    #[test] fn test_tester_passes() { let t = add_tester(sum); t.test(&[v(&[1.0, 2.0]), v(&[3.0, 4.0])]).unwrap(); assert_eq!(t.valid(), 1); }

    #[test]
    fn test_tester_mismatch() {
        let err = add_tester(first).test(&[v(&[1.0, 2.0]), v(&[3.0, 4.0])]).unwrap_err();
        assert_eq!(err, OracleError::Mismatch { context: "(v+ [1.0 2.0] [3.0 4.0])".into(), expected: "[4.0 6.0]".into(), actual: "[1.0 2.0]".into() });
    }

    fn positive_zero(_: &[Native]) -> CallResult { Ok(Native::double(0.0)) }

    #[test]
    fn test_tester_signed_zero_mismatch() {
        let t = FunctionTester::new("dot", |t| inner_product(t, OperatorPair::add(), OperatorPair::multiply()), external(positive_zero));
        let err = t.test(&[v(&[0.0]), v(&[-5.0])]).unwrap_err();
        assert_eq!(err, OracleError::Mismatch { context: "(dot [0.0] [-5.0])".into(), expected: "-0.0".into(), actual: "0.0".into() });
        assert_eq!(t.valid(), 0);
    }

    #[test] fn test_tester_reference_rejects() { assert!(matches!(add_tester(sum).test(&[v(&[1.0]), v(&[1.0, 2.0])]), Err(OracleError::Shape(_)))); }
    #[test] fn test_tester_call_failure() { assert!(matches!(add_tester(reject).test(&[v(&[1.0])]), Err(OracleError::Interop(InteropError::Call { .. })))); }
    #[test] fn test_expect_throw_accepts_precondition() { let t = add_tester(reject); t.expect_throw(&[v(&[1.0]), Tensor::scalar(1.0)]).unwrap(); assert_eq!(t.invalid(), 1); }
    #[test] fn test_expect_throw_unexpected_success() { assert!(matches!(add_tester(first).expect_throw(&[Tensor::scalar(1.0)]), Err(OracleError::Interop(InteropError::UnexpectedSuccess { .. })))); }

    proptest! {
        #[test]
        fn prop_generated_values_are_hundredths(seed in any::<u64>()) {
            let mut g = TensorGen::new(seed);
            for _ in 0..32 {
                let x = g.double();
                prop_assert!((-100.0..=100.0).contains(&x));
                prop_assert_eq!((x * 100.0).round() / 100.0, x);
                prop_assert_ne!(g.non_zero_double(), 0.0);
            }
        }
    }
}
