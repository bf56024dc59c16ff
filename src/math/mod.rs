pub mod tensor;
pub mod ops;

pub use tensor::{Tensor, TensorView, TensorRead, TensorWrite, MAX_RANK};
