//! Seeded input generation
//!
//! Every value is an integer in `[-10000, 10000]` divided by 100, so all
//! inputs are two-decimal rationals and a run is reproducible from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use lindiff_tensor::tensor::Tensor;

pub struct TensorGen {
    rng: StdRng,
}

impl TensorGen {
    pub fn new(seed: u64) -> Self { TensorGen { rng: StdRng::seed_from_u64(seed) } }

    pub fn double(&mut self) -> f64 { self.rng.gen_range(-10_000i64..=10_000) as f64 / 100.0 }

    /// Like [`double`](Self::double), redrawing zeros. Used for divisors.
    pub fn non_zero_double(&mut self) -> f64 {
        loop {
            let value = self.double();
            if value != 0.0 {
                return value;
            }
        }
    }

    /// A dimension in `1..=max`.
    pub fn dim(&mut self, max: usize) -> usize { self.rng.gen_range(1..=max) }

    pub fn scalar(&mut self) -> Tensor<f64> { Tensor::scalar(self.double()) }
    pub fn vector(&mut self, dim: usize) -> Tensor<f64> { self.tensor(&[dim]) }
    pub fn matrix(&mut self, rows: usize, cols: usize) -> Tensor<f64> { self.tensor(&[rows, cols]) }

    pub fn tensor(&mut self, shape: &[usize]) -> Tensor<f64> { Tensor::generate(shape, &mut || self.double()) }
    pub fn non_zero_tensor(&mut self, shape: &[usize]) -> Tensor<f64> { Tensor::generate(shape, &mut || self.non_zero_double()) }

    /// `count` independent tensors of one shape.
    pub fn repeat(&mut self, count: usize, shape: &[usize]) -> Vec<Tensor<f64>> {
        (0..count).map(|_| self.tensor(shape)).collect()
    }

    pub fn repeat_non_zero(&mut self, count: usize, shape: &[usize]) -> Vec<Tensor<f64>> {
        (0..count).map(|_| self.non_zero_tensor(shape)).collect()
    }

    /// One tensor per listed shape; an empty shape yields a scalar.
    pub fn shaped(&mut self, shapes: &[&[usize]]) -> Vec<Tensor<f64>> {
        shapes.iter().map(|shape| self.tensor(shape)).collect()
    }

    /// A tensor of `shape` followed by `count` scalars.
    pub fn with_scalars(&mut self, shape: &[usize], count: usize) -> Vec<Tensor<f64>> {
        let mut args = vec![self.tensor(shape)];
        args.extend((0..count).map(|_| self.scalar()));
        args
    }
}
