//! Reference algebra
//!
//! Every operation is expressed through [`elementwise_combine`] plus explicit
//! rank checks. Scalars, vectors and matrices differ only in recursion depth,
//! so there is one code path per operation rather than one per rank.

use crate::error::{ShapeError, ShapeResult};
use crate::op::OperatorPair;
use crate::tensor::{Element, Tensor};

// ============ Elementwise core ============

/// Applies `op.unary` to every leaf of a lone operand, or folds `op.binary`
/// left to right across the corresponding leaves of two or more operands of
/// identical shape.
pub fn elementwise_combine<T: Element>(tensors: &[Tensor<T>], op: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    match tensors {
        [] => Err(ShapeError::empty("elementwise")),
        [only] => Ok(only.map_leaves(&|v| (op.unary)(v))),
        _ => {
            let refs: Vec<&Tensor<T>> = tensors.iter().collect();
            zip_fold(&refs, op.binary)
        }
    }
}

fn zip_fold<T: Element>(tensors: &[&Tensor<T>], binary: fn(T, T) -> T) -> ShapeResult<Tensor<T>> {
    match tensors.first() {
        None => Err(ShapeError::empty("elementwise")),
        Some(Tensor::Scalar(_)) => {
            let values = tensors
                .iter()
                .map(|t| match t {
                    Tensor::Scalar(v) => Ok(*v),
                    Tensor::Vector(items) => Err(ShapeError::dims("elementwise", vec![], vec![items.len()])),
                })
                .collect::<ShapeResult<Vec<T>>>()?;
            let (first, rest) = values.split_first().ok_or(ShapeError::empty("elementwise"))?;
            Ok(Tensor::Scalar(rest.iter().fold(*first, |acc, v| binary(acc, *v))))
        }
        Some(Tensor::Vector(items)) => {
            let len = items.len();
            let rows = tensors
                .iter()
                .map(|t| match t {
                    Tensor::Vector(other) if other.len() == len => Ok(other.as_slice()),
                    Tensor::Vector(other) => Err(ShapeError::dims("elementwise", vec![len], vec![other.len()])),
                    Tensor::Scalar(_) => Err(ShapeError::dims("elementwise", vec![len], vec![])),
                })
                .collect::<ShapeResult<Vec<&[Tensor<T>]>>>()?;
            let combined = (0..len)
                .map(|i| {
                    let column: Vec<&Tensor<T>> = rows.iter().map(|row| &row[i]).collect();
                    zip_fold(&column, binary)
                })
                .collect::<ShapeResult<Vec<_>>>()?;
            Ok(Tensor::Vector(combined))
        }
    }
}

fn expect_rank<T: Element>(op: &'static str, index: usize, tensor: &Tensor<T>, rank: usize) -> ShapeResult<Vec<usize>> {
    let shape = tensor.shape().map_err(|e| e.within(op))?;
    if shape.len() != rank {
        return Err(ShapeError::rank(op, index, rank, shape.len()));
    }
    Ok(shape)
}

fn ranked_comp_wise<T: Element>(op_name: &'static str, rank: usize, tensors: &[Tensor<T>], op: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    if tensors.is_empty() {
        return Err(ShapeError::empty(op_name));
    }
    for (i, t) in tensors.iter().enumerate() {
        expect_rank(op_name, i, t, rank)?;
    }
    elementwise_combine(tensors, op).map_err(|e| e.within(op_name))
}

/// Elementwise combination of rank-1 operands.
pub fn vector_comp_wise<T: Element>(tensors: &[Tensor<T>], op: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    ranked_comp_wise("vector_comp_wise", 1, tensors, op)
}

/// Elementwise combination of rank-2 operands.
pub fn matrix_comp_wise<T: Element>(tensors: &[Tensor<T>], op: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    ranked_comp_wise("matrix_comp_wise", 2, tensors, op)
}

// ============ Reductions ============

/// Multiplies rank-1 operands elementwise, then folds the products with `add`.
pub fn inner_product<T: Element>(tensors: &[Tensor<T>], add: OperatorPair<T>, mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    let products = vector_comp_wise(tensors, mul).map_err(|e| e.within("inner_product"))?;
    add.fold(&products.leaves())
        .map(Tensor::Scalar)
        .ok_or(ShapeError::empty("inner_product"))
}

fn dot<T: Element>(lhs: &Tensor<T>, rhs: &Tensor<T>, add: OperatorPair<T>, mul: OperatorPair<T>) -> ShapeResult<T> {
    let products = zip_fold(&[lhs, rhs], mul.binary)?.leaves();
    let (first, rest) = products.split_first().ok_or(ShapeError::empty("dot"))?;
    Ok(rest.iter().fold(*first, |acc, v| (add.binary)(acc, *v)))
}

// ============ Scaling ============

fn scale_ranked<T: Element>(op: &'static str, rank: Option<usize>, tensors: &[Tensor<T>], mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    let (first, factors) = tensors.split_first().ok_or(ShapeError::empty(op))?;
    let shape = first.shape().map_err(|e| e.within(op))?;
    match rank {
        Some(expected) if shape.len() != expected => return Err(ShapeError::rank(op, 0, expected, shape.len())),
        None if shape.is_empty() => return Err(ShapeError::rank(op, 0, 1, 0)),
        _ => {}
    }
    let values = factors
        .iter()
        .enumerate()
        .map(|(i, t)| match t {
            Tensor::Scalar(v) => Ok(*v),
            Tensor::Vector(items) => Err(ShapeError::NotScalar { op, index: i + 1, len: items.len() }),
        })
        .collect::<ShapeResult<Vec<T>>>()?;
    let Some((head, tail)) = values.split_first() else {
        return Ok(first.clone());
    };
    let factor = tail.iter().fold(*head, |acc, v| (mul.binary)(acc, *v));
    Ok(first.map_leaves(&|v| (mul.binary)(v, factor)))
}

/// Scales the first operand (rank >= 1) by the product of the remaining scalars.
/// A lone operand is returned unchanged.
pub fn scale<T: Element>(tensors: &[Tensor<T>], mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    scale_ranked("scale", None, tensors, mul)
}

pub fn vector_scale<T: Element>(tensors: &[Tensor<T>], mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    scale_ranked("vector_scale", Some(1), tensors, mul)
}

pub fn matrix_scale<T: Element>(tensors: &[Tensor<T>], mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    scale_ranked("matrix_scale", Some(2), tensors, mul)
}

// ============ Matrix operations ============

fn rows<T>(matrix: &Tensor<T>) -> &[Tensor<T>] {
    match matrix {
        Tensor::Vector(items) => items,
        Tensor::Scalar(_) => &[],
    }
}

/// Transpose of a matrix whose shape has already been validated.
fn transpose_matrix<T: Element>(matrix: &Tensor<T>) -> Tensor<T> {
    let matrix_rows = rows(matrix);
    let cols = matrix_rows.first().map_or(0, |row| rows(row).len());
    Tensor::Vector(
        (0..cols)
            .map(|j| Tensor::Vector(matrix_rows.iter().map(|row| rows(row)[j].clone()).collect()))
            .collect(),
    )
}

/// Transpose of exactly one rank-2 operand.
pub fn transpose<T: Element>(tensors: &[Tensor<T>]) -> ShapeResult<Tensor<T>> {
    let [matrix] = tensors else {
        return Err(ShapeError::arity("transpose", 1, tensors.len()));
    };
    expect_rank("transpose", 0, matrix, 2)?;
    Ok(transpose_matrix(matrix))
}

/// Dots every row of the first operand with the second. Rows are taken as
/// given; no transposition happens here.
pub fn matrix_times_vector<T: Element>(tensors: &[Tensor<T>], add: OperatorPair<T>, mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    const OP: &str = "matrix_times_vector";
    let [matrix, vector] = tensors else {
        return Err(ShapeError::arity(OP, 2, tensors.len()));
    };
    let m_shape = expect_rank(OP, 0, matrix, 2)?;
    let v_shape = expect_rank(OP, 1, vector, 1)?;
    if m_shape[1] != v_shape[0] {
        return Err(ShapeError::dims(OP, vec![m_shape[1]], v_shape));
    }
    rows(matrix)
        .iter()
        .map(|row| dot(row, vector, add, mul).map(Tensor::Scalar).map_err(|e| e.within(OP)))
        .collect::<ShapeResult<Vec<_>>>()
        .map(Tensor::Vector)
}

fn multiply_matrices<T: Element>(lhs: &Tensor<T>, rhs: &Tensor<T>, add: OperatorPair<T>, mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    const OP: &str = "compose_matrices";
    let l_shape = lhs.shape().map_err(|e| e.within(OP))?;
    let r_shape = rhs.shape().map_err(|e| e.within(OP))?;
    if l_shape[1] != r_shape[0] {
        return Err(ShapeError::dims(OP, vec![l_shape[1]], vec![r_shape[0]]));
    }
    let rhs_t = transpose_matrix(rhs);
    rows(lhs)
        .iter()
        .map(|row| {
            rows(&rhs_t)
                .iter()
                .map(|col| dot(row, col, add, mul).map(Tensor::Scalar).map_err(|e| e.within(OP)))
                .collect::<ShapeResult<Vec<_>>>()
                .map(Tensor::Vector)
        })
        .collect::<ShapeResult<Vec<_>>>()
        .map(Tensor::Vector)
}

/// Left-folds matrix multiplication across a chain of rank-2 operands.
pub fn compose_matrices<T: Element>(tensors: &[Tensor<T>], add: OperatorPair<T>, mul: OperatorPair<T>) -> ShapeResult<Tensor<T>> {
    const OP: &str = "compose_matrices";
    let (first, rest) = tensors.split_first().ok_or(ShapeError::empty(OP))?;
    for (i, t) in tensors.iter().enumerate() {
        expect_rank(OP, i, t, 2)?;
    }
    rest.iter().try_fold(first.clone(), |acc, next| multiply_matrices(&acc, next, add, mul))
}
