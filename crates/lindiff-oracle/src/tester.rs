//! Pairing of one reference operation with its external counterpart

use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;
use lindiff_interop::call::{call_nullable, expect_failure, Callable};
use lindiff_interop::error::FailureKind;
use lindiff_interop::marshal::{annotate_call, from_native};
use lindiff_interop::native::NativeElement;
use lindiff_tensor::error::ShapeResult;
use lindiff_tensor::tensor::Tensor;
use crate::error::{OracleError, OracleResult};

pub type Reference<T> = Box<dyn Fn(&[Tensor<T>]) -> ShapeResult<Tensor<T>>>;

pub struct FunctionTester<T> {
    name: String,
    reference: Reference<T>,
    external: Rc<dyn Callable>,
    valid: Cell<usize>,
    invalid: Cell<usize>,
}

impl<T: NativeElement> FunctionTester<T> {
    pub fn new(
        name: impl Into<String>,
        reference: impl Fn(&[Tensor<T>]) -> ShapeResult<Tensor<T>> + 'static,
        external: Rc<dyn Callable>,
    ) -> Self {
        FunctionTester { name: name.into(), reference: Box::new(reference), external, valid: Cell::new(0), invalid: Cell::new(0) }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn external(&self) -> &dyn Callable { self.external.as_ref() }

    /// Checks that the external operation returns exactly what the reference
    /// computes for `inputs`, down to the sign of zero.
    pub fn test(&self, inputs: &[Tensor<T>]) -> OracleResult<()> {
        let expected = (self.reference)(inputs)?;
        let call = annotate_call(&self.name, inputs);
        let result = call_nullable(self.external(), &call.context, &call.value)?;
        let actual: Tensor<T> = from_native(&result, &call.context)?;
        if !actual.exact_eq(&expected) {
            return Err(OracleError::Mismatch {
                context: call.context,
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        debug!(op = %self.name, "ok {}", call.context);
        self.valid.set(self.valid.get() + 1);
        Ok(())
    }

    /// Checks that the external operation rejects `inputs` with an assertion failure.
    pub fn expect_throw(&self, inputs: &[Tensor<T>]) -> OracleResult<()> {
        let call = annotate_call(&self.name, inputs);
        let failure = expect_failure(self.external(), &call.context, FailureKind::Assertion, &call.value)?;
        debug!(op = %self.name, kind = %failure.kind, "rejected {}", call.context);
        self.invalid.set(self.invalid.get() + 1);
        Ok(())
    }

    /// Positive cases passed so far.
    pub fn valid(&self) -> usize { self.valid.get() }
    /// Negative cases correctly rejected so far.
    pub fn invalid(&self) -> usize { self.invalid.get() }
}

impl<T> std::fmt::Debug for FunctionTester<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTester").field("name", &self.name).field("callee", &self.external.name()).finish()
    }
}
