//! The linear algebra suite: a seeded positive sweep and a fixed matrix of
//! shape violations, run against one namespace.

use serde::Serialize;
use tracing::info;
use lindiff_interop::call::call_non_null_typed;
use lindiff_interop::namespace::Namespace;
use lindiff_interop::native::NativeKind;
use lindiff_tensor::algebra::{
    compose_matrices, inner_product, matrix_comp_wise, matrix_scale, matrix_times_vector, transpose, vector_comp_wise,
    vector_scale,
};
use lindiff_tensor::error::ShapeResult;
use lindiff_tensor::op::OperatorPair;
use lindiff_tensor::tensor::Tensor;
use crate::config::OracleConfig;
use crate::error::{OracleError, OracleResult};
use crate::gen::TensorGen;
use crate::tester::FunctionTester;

type Shapes = &'static [&'static [usize]];

// ============ Negative cases ============

/// Elementwise and inner-product operations on vectors.
pub const INVALID_VECTOR_ARGS: &[Shapes] = &[
    &[&[], &[]],
    &[&[], &[3]],
    &[&[3], &[]],
    &[&[3], &[3, 3]],
    &[&[3, 3], &[3]],
    &[&[3, 3], &[3, 3]],
    &[&[4], &[3]],
    &[&[3], &[4]],
    &[&[2], &[3], &[3]],
    &[&[3], &[2], &[3]],
    &[&[3], &[3], &[2]],
];

/// Elementwise operations on matrices.
pub const INVALID_MATRIX_ARGS: &[Shapes] = &[
    &[&[], &[]],
    &[&[], &[3, 3]],
    &[&[3, 3], &[]],
    &[&[3], &[3]],
    &[&[3], &[3, 3]],
    &[&[3, 3], &[3]],
    &[&[3, 3, 3], &[3, 3, 3]],
    &[&[4, 3], &[3, 3]],
    &[&[3, 3], &[3, 4]],
    &[&[2, 3], &[3, 3], &[3, 3]],
    &[&[3, 3], &[2, 3], &[3, 3]],
    &[&[3, 3], &[3, 3], &[2, 3]],
    &[&[3, 5], &[3, 3], &[3, 3]],
    &[&[3, 3], &[3, 5], &[3, 3]],
    &[&[3, 3], &[3, 3], &[3, 5]],
];

pub const INVALID_VECTOR_SCALE_ARGS: &[Shapes] = &[
    &[&[], &[]],
    &[&[3, 3], &[]],
    &[&[3], &[3]],
    &[&[3], &[], &[3]],
    &[&[], &[3]],
];

pub const INVALID_MATRIX_SCALE_ARGS: &[Shapes] = &[
    &[&[], &[]],
    &[&[3], &[]],
    &[&[3, 3, 3], &[]],
    &[&[3, 3], &[3, 3]],
    &[&[3, 3], &[], &[3, 3]],
    &[&[], &[3, 3]],
    &[&[3, 3], &[3]],
    &[&[3, 3], &[], &[3]],
];

pub const INVALID_MATRIX_VECTOR_ARGS: &[Shapes] = &[
    &[&[3], &[]],
    &[&[3, 3], &[]],
    &[&[3], &[3]],
    &[&[3], &[3, 3]],
    &[&[3, 3], &[]],
    &[&[3, 2], &[3]],
    &[&[3, 3], &[4]],
];

pub const INVALID_TRANSPOSE_ARGS: &[Shapes] = &[&[&[]], &[&[3]], &[&[3, 3, 3]]];

pub const INVALID_COMPOSE_ARGS: &[Shapes] = &[
    &[&[], &[]],
    &[&[3], &[3]],
    &[&[3, 3], &[3]],
    &[&[3, 3], &[]],
    &[&[3], &[3, 3]],
    &[&[3, 4], &[3, 4]],
    &[&[3, 2], &[3, 3]],
    &[&[3, 2], &[4, 3], &[3, 3]],
    &[&[3, 3], &[3, 4], &[2, 3]],
    &[&[3, 4], &[3, 3], &[4, 3]],
];

// ============ Report ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    pub name: String,
    pub valid: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub namespace: String,
    pub seed: u64,
    pub zero_arity_dot: bool,
    pub operations: Vec<OperationReport>,
}

impl SuiteReport {
    pub fn cases_total(&self) -> usize { self.operations.iter().map(|op| op.valid + op.invalid).sum() }
}

// ============ Suite ============

fn add() -> OperatorPair<f64> { OperatorPair::add() }
fn mul() -> OperatorPair<f64> { OperatorPair::multiply() }

fn tester(
    ns: &Namespace,
    name: &str,
    reference: impl Fn(&[Tensor<f64>]) -> ShapeResult<Tensor<f64>> + 'static,
) -> OracleResult<FunctionTester<f64>> {
    Ok(FunctionTester::new(name, reference, ns.var(name)?))
}

pub struct LinearSuite {
    config: OracleConfig,
    gen: TensorGen,
    zero_arity_dot: bool,
    v_add: FunctionTester<f64>,
    v_sub: FunctionTester<f64>,
    v_mul: FunctionTester<f64>,
    v_div: FunctionTester<f64>,
    m_add: FunctionTester<f64>,
    m_sub: FunctionTester<f64>,
    m_mul: FunctionTester<f64>,
    m_div: FunctionTester<f64>,
    dot: FunctionTester<f64>,
    v_scale: FunctionTester<f64>,
    m_scale: FunctionTester<f64>,
    m_times_v: FunctionTester<f64>,
    m_times_m: FunctionTester<f64>,
    transpose: FunctionTester<f64>,
}

impl LinearSuite {
    /// Resolves every operation in `ns`. Fails if any is missing.
    pub fn new(ns: &Namespace, config: OracleConfig) -> OracleResult<Self> {
        config.validate()?;
        Ok(LinearSuite {
            gen: TensorGen::new(config.seed),
            config,
            zero_arity_dot: false,
            v_add: tester(ns, "v+", |t| vector_comp_wise(t, add()))?,
            v_sub: tester(ns, "v-", |t| vector_comp_wise(t, OperatorPair::subtract()))?,
            v_mul: tester(ns, "v*", |t| vector_comp_wise(t, mul()))?,
            v_div: tester(ns, "vd", |t| vector_comp_wise(t, OperatorPair::divide()))?,
            m_add: tester(ns, "m+", |t| matrix_comp_wise(t, add()))?,
            m_sub: tester(ns, "m-", |t| matrix_comp_wise(t, OperatorPair::subtract()))?,
            m_mul: tester(ns, "m*", |t| matrix_comp_wise(t, mul()))?,
            m_div: tester(ns, "md", |t| matrix_comp_wise(t, OperatorPair::divide()))?,
            dot: tester(ns, "dot", |t| inner_product(t, add(), mul()))?,
            v_scale: tester(ns, "v*s", |t| vector_scale(t, mul()))?,
            m_scale: tester(ns, "m*s", |t| matrix_scale(t, mul()))?,
            m_times_v: tester(ns, "m*v", |t| matrix_times_vector(t, add(), mul()))?,
            m_times_m: tester(ns, "m*m", |t| compose_matrices(t, add(), mul()))?,
            transpose: tester(ns, "transpose", |t| transpose(t))?,
        })
    }

    fn testers(&self) -> [&FunctionTester<f64>; 14] {
        [
            &self.v_add, &self.v_sub, &self.v_mul, &self.v_div, &self.dot, &self.v_scale,
            &self.m_add, &self.m_sub, &self.m_mul, &self.m_div, &self.m_scale, &self.m_times_v,
            &self.m_times_m, &self.transpose,
        ]
    }

    /// One random sweep with `count` operands per variadic call.
    pub fn test_random(&mut self, count: usize) -> OracleResult<()> {
        info!(count, "random sweep");
        let gen = &mut self.gen;
        for dim in 1..=self.config.max_vector_dim {
            let shape = [dim];
            self.v_add.test(&gen.repeat(count, &shape))?;
            self.v_sub.test(&gen.repeat(count, &shape))?;
            self.v_mul.test(&gen.repeat(count, &shape))?;
            self.v_div.test(&gen.repeat_non_zero(count, &shape))?;
            self.dot.test(&gen.repeat(count, &shape))?;
            self.v_scale.test(&gen.with_scalars(&shape, count.saturating_sub(1)))?;
        }
        for complexity in 1..=self.config.max_complexity {
            for rows in 1..=complexity {
                let cols = 1 + complexity - rows;
                let shape = [rows, cols];
                self.m_add.test(&gen.repeat(count, &shape))?;
                self.m_sub.test(&gen.repeat(count, &shape))?;
                self.m_mul.test(&gen.repeat(count, &shape))?;
                self.m_div.test(&gen.repeat_non_zero(count, &shape))?;
                self.m_scale.test(&gen.with_scalars(&shape, count.saturating_sub(1)))?;
                self.m_times_v.test(&[gen.matrix(rows, cols), gen.vector(cols)])?;
                self.transpose.test(&[gen.matrix(rows, cols)])?;
            }
            let dims: Vec<usize> = (0..=count).map(|_| gen.dim(complexity)).collect();
            let chain: Vec<Tensor<f64>> = dims.windows(2).map(|w| gen.matrix(w[0], w[1])).collect();
            self.m_times_m.test(&chain)?;
        }
        Ok(())
    }

    /// `(dot)` with no operands must return the number zero.
    pub fn test_zero_arity_dot(&mut self) -> OracleResult<()> {
        let value = call_non_null_typed(self.dot.external(), "(dot)", NativeKind::Number, &[])?;
        if value.as_f64() != Some(0.0) {
            return Err(OracleError::Mismatch { context: "(dot)".to_string(), expected: "0".to_string(), actual: value.to_string() });
        }
        self.zero_arity_dot = true;
        Ok(())
    }

    pub fn test_valid(&mut self) -> OracleResult<()> {
        for count in self.config.warmup_counts.clone() {
            self.test_random(count)?;
        }
        self.test_zero_arity_dot()?;
        for count in self.config.counts.clone() {
            self.test_random(count)?;
        }
        Ok(())
    }

    fn reject_all(gen: &mut TensorGen, tester: &FunctionTester<f64>, cases: &[Shapes]) -> OracleResult<()> {
        info!(op = tester.name(), cases = cases.len(), "negative cases");
        for shapes in cases {
            tester.expect_throw(&gen.shaped(shapes))?;
        }
        Ok(())
    }

    pub fn test_invalid(&mut self) -> OracleResult<()> {
        let gen = &mut self.gen;
        for tester in [&self.v_add, &self.v_sub, &self.v_mul, &self.v_div, &self.dot] {
            Self::reject_all(gen, tester, INVALID_VECTOR_ARGS)?;
        }
        for tester in [&self.m_add, &self.m_sub, &self.m_mul, &self.m_div] {
            Self::reject_all(gen, tester, INVALID_MATRIX_ARGS)?;
        }
        Self::reject_all(gen, &self.v_scale, INVALID_VECTOR_SCALE_ARGS)?;
        Self::reject_all(gen, &self.m_scale, INVALID_MATRIX_SCALE_ARGS)?;
        Self::reject_all(gen, &self.m_times_v, INVALID_MATRIX_VECTOR_ARGS)?;
        Self::reject_all(gen, &self.transpose, INVALID_TRANSPOSE_ARGS)?;
        Self::reject_all(gen, &self.m_times_m, INVALID_COMPOSE_ARGS)?;
        Ok(())
    }

    /// Runs the positive sweep, then the negative matrix.
    pub fn run(&mut self) -> OracleResult<SuiteReport> {
        self.test_valid()?;
        self.test_invalid()?;
        Ok(self.report())
    }

    pub fn report(&self) -> SuiteReport {
        SuiteReport {
            namespace: self.config.namespace.clone(),
            seed: self.config.seed,
            zero_arity_dot: self.zero_arity_dot,
            operations: self
                .testers()
                .iter()
                .map(|t| OperationReport { name: t.name().to_string(), valid: t.valid(), invalid: t.invalid() })
                .collect(),
        }
    }
}
