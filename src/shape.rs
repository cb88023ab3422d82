use derive_more::{Deref, DerefMut, Display, From, Into};
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tensor::{Tensor, TensorError};

/// Axis lengths of a tensor, outermost first.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deref, DerefMut, From, Into, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("[{}]", _0.iter().format(", "))]
pub struct Shape(Vec<usize>);

impl From<&[usize]> for Shape {
    #[inline]
    fn from(value: &[usize]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    #[inline]
    fn from(value: [usize; N]) -> Self {
        Self(value.to_vec())
    }
}

impl Shape {
    /// Number of leaves a well-formed tensor of this shape holds.
    #[inline]
    pub fn size(&self) -> usize {
        self.iter().product()
    }

    /// Removes singleton axes. Fails if more than one axis is not of length 1.
    ///
    /// A shape made only of singleton axes squeezes to `[1]`, since a tensor is never rank 0.
    pub fn squeeze(&self) -> Result<Self, TensorError> {
        let axes = self.iter().copied().filter(|&len| len != 1).collect_vec();
        match axes.len() {
            0 => Ok(Self(vec![1])),
            1 => Ok(Self(axes)),
            _ => Err(TensorError::Collapse(self.clone())),
        }
    }
}

impl Tensor {
    /// Number of nesting levels. Only the first element is inspected at each level.
    pub fn rank(&self) -> usize {
        match self {
            Tensor::Flat(_) => 1,
            Tensor::Nested(tensors) => tensors.first().map_or(1, |tensor| 1 + tensor.rank()),
        }
    }

    /// Axis lengths, found by descending through the first element `rank` times.
    pub fn shape(&self) -> Shape {
        let mut shape = Vec::with_capacity(self.rank());
        let mut tensor = Some(self);
        while let Some(current) = tensor {
            shape.push(current.len());
            tensor = match current {
                Tensor::Flat(_) => None,
                Tensor::Nested(tensors) => tensors.first(),
            };
        }
        Shape(shape)
    }

    /// Returns `true` if both tensors report the same shape.
    #[inline]
    pub fn same_shape(&self, other: &Tensor) -> bool {
        self.shape() == other.shape()
    }

    /// Checks that the tensors report the same shape.
    #[inline]
    pub(crate) fn check_shape(&self, other: &Tensor) -> Result<Shape, TensorError> {
        let (lhs, rhs) = (self.shape(), other.shape());
        match lhs == rhs {
            true => Ok(lhs),
            false => Err(TensorError::ShapeMismatch(lhs, rhs)),
        }
    }

    /// Checks that every sibling sub-tensor has the same shape, at every level.
    ///
    /// Operations only inspect the first element when inferring shapes,
    /// so this is the way to reject jagged input up front.
    pub fn validate(&self) -> Result<(), TensorError> {
        let Tensor::Nested(tensors) = self else {
            return Ok(());
        };
        if let Some(first) = tensors.first() {
            for tensor in &tensors[1..] {
                first.check_shape(tensor)?;
            }
        }
        tensors.iter().try_for_each(Tensor::validate)
    }

    /// Removes axes of length 1, e.g. `[1, 3, 1]` to `[3]`.
    ///
    /// Fails with [`TensorError::Collapse`] if more than one axis is longer than 1.
    pub fn collapse(&self) -> Result<Tensor, TensorError> {
        self.shape().squeeze()?;
        Ok(Tensor::Flat(self.leaves()))
    }
}
