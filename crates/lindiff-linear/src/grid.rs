//! Dense row-major view of native arguments

use lindiff_interop::error::Failure;
use lindiff_interop::native::Native;

/// A native argument flattened into its shape and row-major data.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl Grid {
    pub fn scalar(value: f64) -> Self { Grid { shape: vec![], data: vec![value] } }

    pub fn from_values(shape: Vec<usize>, data: Vec<f64>) -> Self { Grid { shape, data } }

    /// Flattens `value`, rejecting ragged sequences and non-numeric leaves.
    pub fn from_native(value: &Native) -> Result<Grid, Failure> {
        match value {
            Native::Double(x) => Ok(Grid::scalar(x.0)),
            Native::Long(n) => Ok(Grid::scalar(*n as f64)),
            Native::Vector(items) => {
                let mut inner: Option<Vec<usize>> = None;
                let mut data = Vec::new();
                for item in items {
                    let g = Grid::from_native(item)?;
                    match &inner {
                        None => inner = Some(g.shape),
                        Some(shape) if *shape != g.shape => {
                            return Err(Failure::assertion(format!("Assert failed: ragged sequence {:?} vs {:?}", shape, g.shape)));
                        }
                        Some(_) => {}
                    }
                    data.extend(g.data);
                }
                let mut shape = vec![items.len()];
                shape.extend(inner.unwrap_or_default());
                Ok(Grid { shape, data })
            }
            other => Err(Failure::type_error(format!("{} cannot be cast to Number", other.kind()))),
        }
    }

    pub fn to_native(&self) -> Native { build(&self.shape, &self.data) }

    pub fn rank(&self) -> usize { self.shape.len() }
    pub fn rows(&self) -> usize { self.shape.first().copied().unwrap_or(0) }
    pub fn cols(&self) -> usize { self.shape.get(1).copied().unwrap_or(0) }

    /// Element `(i, j)` of a rank-2 grid.
    pub fn at(&self, i: usize, j: usize) -> f64 { self.data[i * self.cols() + j] }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Grid {
        Grid { shape: self.shape.clone(), data: self.data.iter().map(|&x| f(x)).collect() }
    }
}

fn build(shape: &[usize], data: &[f64]) -> Native {
    match shape.split_first() {
        None => data.first().map_or(Native::Nil, |&x| Native::double(x)),
        Some((&n, rest)) => {
            let stride: usize = rest.iter().product();
            Native::vector((0..n).map(|i| build(rest, &data[i * stride..(i + 1) * stride])).collect())
        }
    }
}
