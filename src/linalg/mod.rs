//! Linear algebra over rank 1 and rank 2 tensors.

pub mod matmul;
pub mod norm;
