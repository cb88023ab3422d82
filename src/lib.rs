//! `vecn` represents vectors, matrices and higher-rank tensors uniformly
//! as recursively nested lists of `f64`.
//!
//! ## Key Components
//! 1. **Shape Model**:
//!    - Rank and per-axis lengths (`Shape`), inferred by descending through the first element.
//!    - Shape equality is the compatibility gate of every binary operation.
//!
//! 2. **Traversal Primitives**:
//!    - `map` and `reduce` over top-level elements.
//!    - `cascade_map`, `cascade_reduce` and `zip`, which recurse down to the leaves.
//!
//! 3. **Derived Operations**:
//!    - Element-wise and scalar arithmetic, equality and flooring.
//!    - Magnitude, normalisation, transpose, matrix product and singleton-axis collapse.
//!
//! ## Design Principles
//! - **Immutability**: every operation returns a new tensor.
//! - **Lazy validation**: construction only checks that lists are homogeneous;
//!   sibling shapes are checked where an operation depends on them.
//!   `Tensor::validate` checks them eagerly, and the `strict` feature does so on construction.
//!
//! ```
//! use vecn::{Element, Tensor};
//!
//! let x = Tensor::create([1, 2, 3])?;
//! let y = Tensor::create([[4], [5], [6]])?;
//! assert_eq!(x.matrix_multiply(&y)?, Element::Scalar(32.0));
//! assert_eq!(x.add_scalar(1.0)?.to_string(), "[2,3,4]");
//! # Ok::<(), vecn::TensorError>(())
//! ```

pub mod arith;
pub mod create;
pub mod linalg;
pub mod ops;
pub mod shape;
pub mod tensor;

pub use create::{Array, Uniform};
pub use shape::Shape;
pub use tensor::{Element, Tensor, TensorError};
