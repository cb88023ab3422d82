//! Traversal primitives. Every derived operation is built from these.
//!
//! The cascading traversals recurse once per rank level, so stack depth grows with the rank.
//! They are not tail-recursive; pathologically deep nesting will exhaust the stack.

use itertools::Itertools;

use crate::tensor::{Element, Tensor, TensorError};

impl Tensor {
    /// Applies `f` to each top-level element, as-is.
    ///
    /// Fails with [`TensorError::Type`] if `f` returns a mix of numbers and tensors.
    pub fn map<F>(&self, f: F) -> Result<Tensor, TensorError>
    where
        F: FnMut(Element) -> Element,
    {
        Tensor::from_elements(self.iter().map(f).collect())
    }

    /// Left-folds the top-level elements. Does not recurse into sub-tensors.
    pub fn reduce<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, Element) -> A,
    {
        self.iter().fold(init, f)
    }

    /// Applies `f` to every leaf, keeping the shape.
    pub fn cascade_map<F>(&self, mut f: F) -> Tensor
    where
        F: FnMut(f64) -> f64,
    {
        fn cascade<F: FnMut(f64) -> f64>(tensor: &Tensor, f: &mut F) -> Tensor {
            match tensor {
                Tensor::Flat(values) => Tensor::Flat(values.iter().map(|&x| f(x)).collect()),
                Tensor::Nested(tensors) => {
                    Tensor::nested(tensors.iter().map(|tensor| cascade(tensor, f)).collect())
                }
            }
        }
        cascade(self, &mut f)
    }

    /// Left-folds every leaf, depth-first in element order.
    pub fn cascade_reduce<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, f64) -> A,
    {
        fn cascade<A, F: FnMut(A, f64) -> A>(tensor: &Tensor, init: A, f: &mut F) -> A {
            match tensor {
                Tensor::Flat(values) => values.iter().fold(init, |acc, &x| f(acc, x)),
                Tensor::Nested(tensors) => tensors
                    .iter()
                    .fold(init, |acc, tensor| cascade(tensor, acc, f)),
            }
        }
        cascade(self, init, &mut f)
    }

    /// Combines corresponding leaves of two tensors of equal shape.
    ///
    /// Shapes are compared at every level on the way down, so jagged input is caught
    /// wherever the two tensors disagree. Fails with [`TensorError::ShapeMismatch`].
    pub fn zip<F>(&self, other: &Tensor, mut f: F) -> Result<Tensor, TensorError>
    where
        F: FnMut(f64, f64) -> f64,
    {
        fn zip<F: FnMut(f64, f64) -> f64>(
            x: &Tensor,
            y: &Tensor,
            f: &mut F,
        ) -> Result<Tensor, TensorError> {
            x.check_shape(y)?;
            if x.is_empty() {
                return Ok(Tensor::default());
            }
            match (x, y) {
                (Tensor::Flat(x), Tensor::Flat(y)) => Ok(Tensor::Flat(
                    x.iter().zip_eq(y.iter()).map(|(&x, &y)| f(x, y)).collect(),
                )),
                (Tensor::Nested(x), Tensor::Nested(y)) => x
                    .iter()
                    .zip_eq(y.iter())
                    .map(|(x, y)| zip(x, y, f))
                    .try_collect()
                    .map(Tensor::nested),
                _ => Err(TensorError::ShapeMismatch(x.shape(), y.shape())),
            }
        }
        zip(self, other, &mut f)
    }

    /// Collects every leaf, depth-first in element order.
    pub fn leaves(&self) -> Vec<f64> {
        self.cascade_reduce(Vec::with_capacity(self.shape().size()), |mut leaves, x| {
            leaves.push(x);
            leaves
        })
    }
}
