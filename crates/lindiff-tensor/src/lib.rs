//! # lindiff-tensor - Recursive tensors and the reference algebra
//!
//! The trusted side of the differential oracle: every result produced here is
//! what an external implementation of the same operation must return.

pub mod error;
pub mod tensor;
pub mod op;
pub mod algebra;

pub mod prelude {
    pub use crate::error::{ShapeError, ShapeResult};
    pub use crate::tensor::{Element, Tensor};
    pub use crate::op::OperatorPair;
    pub use crate::algebra::{
        compose_matrices, elementwise_combine, inner_product, matrix_comp_wise, matrix_scale,
        matrix_times_vector, scale, transpose, vector_comp_wise, vector_scale,
    };
}
