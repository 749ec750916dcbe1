//! Operations of the `linear` namespace
//!
//! Each operation validates its arguments up front and signals contract
//! violations as assertion or precondition failures. Reductions fold left
//! from the first element.

use lindiff_interop::error::{CallResult, Failure};
use lindiff_interop::native::Native;
use crate::grid::Grid;

type Checked<T> = Result<T, Failure>;

// ============ Argument handling ============

fn grids(args: &[Native]) -> Checked<Vec<Grid>> { args.iter().map(Grid::from_native).collect() }

fn nonempty(args: &[Grid]) -> Checked<(&Grid, &[Grid])> {
    args.split_first().ok_or_else(|| Failure::arity("at least 1", 0))
}

fn require_rank(op: &str, index: usize, g: &Grid, rank: usize) -> Checked<()> {
    if g.rank() != rank {
        let pred = match rank { 0 => "number?", 1 => "vector?", _ => "matrix?" };
        return Err(Failure::precondition(format!("Assert failed: ({} %{}) in {}, found shape {:?}", pred, index + 1, op, g.shape)));
    }
    Ok(())
}

fn require_same_shape(op: &str, args: &[Grid]) -> Checked<()> {
    if let Some((first, rest)) = args.split_first() {
        if let Some(other) = rest.iter().find(|g| g.shape != first.shape) {
            return Err(Failure::assertion(format!("Assert failed: (= shapes) in {}, {:?} vs {:?}", op, first.shape, other.shape)));
        }
    }
    Ok(())
}

fn sum(op: &str, values: impl Iterator<Item = f64>) -> Checked<f64> {
    values.reduce(|acc, x| acc + x).ok_or_else(|| Failure::assertion(format!("Assert failed: (seq products) in {}", op)))
}

// ============ Elementwise ============

fn comp_wise(op: &str, rank: usize, args: &[Native], unary: fn(f64) -> f64, binary: fn(f64, f64) -> f64) -> CallResult {
    let gs = grids(args)?;
    let (first, rest) = nonempty(&gs)?;
    for (i, g) in gs.iter().enumerate() {
        require_rank(op, i, g, rank)?;
    }
    require_same_shape(op, &gs)?;
    if rest.is_empty() {
        return Ok(first.map(unary).to_native());
    }
    let data = (0..first.data.len())
        .map(|i| rest.iter().fold(first.data[i], |acc, g| binary(acc, g.data[i])))
        .collect();
    Ok(Grid::from_values(first.shape.clone(), data).to_native())
}

fn same(x: f64) -> f64 { x }
fn neg(x: f64) -> f64 { -x }
fn recip(x: f64) -> f64 { 1.0 / x }
fn plus(a: f64, b: f64) -> f64 { a + b }
fn minus(a: f64, b: f64) -> f64 { a - b }
fn times(a: f64, b: f64) -> f64 { a * b }
fn divided(a: f64, b: f64) -> f64 { a / b }

pub fn v_add(args: &[Native]) -> CallResult { comp_wise("v+", 1, args, same, plus) }
pub fn v_sub(args: &[Native]) -> CallResult { comp_wise("v-", 1, args, neg, minus) }
pub fn v_mul(args: &[Native]) -> CallResult { comp_wise("v*", 1, args, same, times) }
pub fn v_div(args: &[Native]) -> CallResult { comp_wise("vd", 1, args, recip, divided) }
pub fn m_add(args: &[Native]) -> CallResult { comp_wise("m+", 2, args, same, plus) }
pub fn m_sub(args: &[Native]) -> CallResult { comp_wise("m-", 2, args, neg, minus) }
pub fn m_mul(args: &[Native]) -> CallResult { comp_wise("m*", 2, args, same, times) }
pub fn m_div(args: &[Native]) -> CallResult { comp_wise("md", 2, args, recip, divided) }

// ============ Products ============

/// Inner product of one or more equal-length vectors. With no arguments the
/// additive identity is returned.
pub fn dot(args: &[Native]) -> CallResult {
    if args.is_empty() {
        return Ok(Native::long(0));
    }
    let gs = grids(args)?;
    for (i, g) in gs.iter().enumerate() {
        require_rank("dot", i, g, 1)?;
    }
    require_same_shape("dot", &gs)?;
    let (first, rest) = nonempty(&gs)?;
    let products = (0..first.data.len()).map(|i| rest.iter().fold(first.data[i], |acc, g| acc * g.data[i]));
    sum("dot", products).map(Native::double)
}

fn scaled(op: &str, rank: usize, args: &[Native]) -> CallResult {
    let gs = grids(args)?;
    let (first, factors) = nonempty(&gs)?;
    require_rank(op, 0, first, rank)?;
    for (i, g) in factors.iter().enumerate() {
        require_rank(op, i + 1, g, 0)?;
    }
    let Some((head, tail)) = factors.split_first() else {
        return Ok(first.to_native());
    };
    let factor = tail.iter().fold(head.data[0], |acc, g| acc * g.data[0]);
    Ok(first.map(|x| x * factor).to_native())
}

pub fn v_scale(args: &[Native]) -> CallResult { scaled("v*s", 1, args) }
pub fn m_scale(args: &[Native]) -> CallResult { scaled("m*s", 2, args) }

/// Dots every row of the matrix with the vector.
pub fn m_times_v(args: &[Native]) -> CallResult {
    let [m, v] = args else {
        return Err(Failure::arity("2", args.len()));
    };
    let (m, v) = (Grid::from_native(m)?, Grid::from_native(v)?);
    require_rank("m*v", 0, &m, 2)?;
    require_rank("m*v", 1, &v, 1)?;
    if m.cols() != v.rows() {
        return Err(Failure::assertion(format!("Assert failed: (= (count (first m)) (count v)) in m*v, {} vs {}", m.cols(), v.rows())));
    }
    let data = (0..m.rows())
        .map(|i| sum("m*v", (0..m.cols()).map(|k| m.at(i, k) * v.data[k])))
        .collect::<Checked<Vec<f64>>>()?;
    Ok(Grid::from_values(vec![m.rows()], data).to_native())
}

fn matmul(lhs: &Grid, rhs: &Grid) -> Checked<Grid> {
    if lhs.cols() != rhs.rows() {
        return Err(Failure::assertion(format!(
            "Assert failed: (= (count (first a)) (count b)) in m*m, [{} {}] x [{} {}]",
            lhs.rows(), lhs.cols(), rhs.rows(), rhs.cols()
        )));
    }
    let (m, n, p) = (lhs.rows(), lhs.cols(), rhs.cols());
    let mut data = Vec::with_capacity(m * p);
    for i in 0..m {
        for j in 0..p {
            data.push(sum("m*m", (0..n).map(|k| lhs.at(i, k) * rhs.at(k, j)))?);
        }
    }
    Ok(Grid::from_values(vec![m, p], data))
}

/// Left-folded product of one or more matrices.
pub fn m_times_m(args: &[Native]) -> CallResult {
    let gs = grids(args)?;
    for (i, g) in gs.iter().enumerate() {
        require_rank("m*m", i, g, 2)?;
    }
    let (first, rest) = nonempty(&gs)?;
    let product = rest.iter().try_fold(first.clone(), |acc, next| matmul(&acc, next))?;
    Ok(product.to_native())
}

pub fn transpose(args: &[Native]) -> CallResult {
    let [m] = args else {
        return Err(Failure::arity("1", args.len()));
    };
    let m = Grid::from_native(m)?;
    require_rank("transpose", 0, &m, 2)?;
    let (rows, cols) = (m.rows(), m.cols());
    let mut data = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        for i in 0..rows {
            data.push(m.at(i, j));
        }
    }
    Ok(Grid::from_values(vec![cols, rows], data).to_native())
}
