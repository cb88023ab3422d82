use derive_more::{Display, From};
use itertools::{Either, Itertools};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shape::Shape;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    #[error("tensor type error: {0}")]
    Type(String),
    #[error("tensor arity error: {0} argument(s) given, {1} expected")]
    Arity(usize, &'static str),
    #[error("tensor shape error: shape {0} mismatches {1}")]
    ShapeMismatch(Shape, Shape),
    #[error("tensor rank error: {op} supports rank up to {max}, got {rank}")]
    Rank {
        op: &'static str,
        max: usize,
        rank: usize,
    },
    #[error("tensor index error: index {0} is out of bounds for length {1}")]
    Index(usize, usize),
    #[error("tensor index error: {0} indices given to access a rank {1} tensor")]
    Indices(usize, usize),
    #[error("tensor collapse error: shape {0} has more than one non-singleton axis")]
    Collapse(Shape),
    #[error("tensor creation error: at least one dimension is required")]
    Dimensions,
}

/// A rank-agnostic tensor.
///
/// A tensor either holds plain numbers (rank 1) or sub-tensors (rank `1 + rank(first)`).
/// Siblings are expected to share a shape, but this is only checked by the operations that need it.
#[derive(Debug, Clone, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(untagged, try_from = "TensorRepr")
)]
pub enum Tensor {
    #[display("[{}]", _0.iter().format(","))]
    Flat(Vec<f64>),
    #[display("[{}]", _0.iter().format(","))]
    Nested(Vec<Tensor>),
}

/// Wire form of [`Tensor`]. Nested input goes through the same checks as construction.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum TensorRepr {
    Flat(Vec<f64>),
    Nested(Vec<Tensor>),
}

#[cfg(feature = "serde")]
impl TryFrom<TensorRepr> for Tensor {
    type Error = TensorError;

    fn try_from(value: TensorRepr) -> Result<Self, Self::Error> {
        match value {
            TensorRepr::Flat(values) => Ok(Self::Flat(values)),
            TensorRepr::Nested(tensors) => Self::from_tensors(tensors),
        }
    }
}

impl Default for Tensor {
    #[inline]
    fn default() -> Self {
        Self::Flat(vec![])
    }
}

impl PartialEq for Tensor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// A top-level element of a tensor: either a number or a sub-tensor.
#[derive(Debug, Clone, PartialEq, From, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Element {
    Scalar(f64),
    Tensor(Tensor),
}

impl Element {
    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Element::Scalar(value) => Some(*value),
            Element::Tensor(_) => None,
        }
    }

    #[inline]
    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Element::Scalar(_) => None,
            Element::Tensor(tensor) => Some(tensor),
        }
    }

    #[inline]
    pub fn into_tensor(self) -> Option<Tensor> {
        match self {
            Element::Scalar(_) => None,
            Element::Tensor(tensor) => Some(tensor),
        }
    }
}

impl Tensor {
    /// Wraps sub-tensors as they are. No sub-tensors gives an empty rank 1 tensor.
    #[inline]
    pub(crate) fn nested(tensors: Vec<Tensor>) -> Self {
        match tensors.is_empty() {
            true => Self::default(),
            false => Self::Nested(tensors),
        }
    }

    /// Builds a tensor from sub-tensors. No sub-tensors gives an empty rank 1 tensor.
    pub(crate) fn from_tensors(tensors: Vec<Tensor>) -> Result<Self, TensorError> {
        let tensor = Self::nested(tensors);
        #[cfg(feature = "strict")]
        tensor.validate()?;
        Ok(tensor)
    }

    /// Builds a tensor from top-level elements, which must be all numbers or all tensors.
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, TensorError> {
        match elements.first() {
            None | Some(Element::Scalar(_)) => elements
                .into_iter()
                .map(|element| match element {
                    Element::Scalar(value) => Ok(value),
                    Element::Tensor(tensor) => Err(mixed_error(&tensor)),
                })
                .try_collect()
                .map(Self::Flat),
            Some(Element::Tensor(_)) => {
                let tensors = elements
                    .into_iter()
                    .map(|element| match element {
                        Element::Scalar(value) => Err(mixed_error(value)),
                        Element::Tensor(tensor) => Ok(tensor),
                    })
                    .try_collect()?;
                Self::from_tensors(tensors)
            }
        }
    }

    /// Count of top-level elements.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Tensor::Flat(values) => values.len(),
            Tensor::Nested(tensors) => tensors.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over top-level elements.
    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        match self {
            Tensor::Flat(values) => Either::Left(values.iter().copied().map(Element::Scalar)),
            Tensor::Nested(tensors) => Either::Right(tensors.iter().cloned().map(Element::Tensor)),
        }
    }

    /// Converts the tensor into its top-level elements.
    pub fn into_elements(self) -> Vec<Element> {
        match self {
            Tensor::Flat(values) => values.into_iter().map(Element::Scalar).collect(),
            Tensor::Nested(tensors) => tensors.into_iter().map(Element::Tensor).collect(),
        }
    }

    /// Returns the `index`th top-level element.
    pub fn get(&self, index: usize) -> Result<Element, TensorError> {
        let element = match self {
            Tensor::Flat(values) => values.get(index).copied().map(Element::Scalar),
            Tensor::Nested(tensors) => tensors.get(index).cloned().map(Element::Tensor),
        };
        element.ok_or(TensorError::Index(index, self.len()))
    }

    /// Returns the element found by taking one index per level, e.g. `[i, j]` for a matrix entry.
    pub fn get_at(&self, indices: &[usize]) -> Result<Element, TensorError> {
        let rank = self.rank();
        if indices.is_empty() || indices.len() > rank {
            return Err(TensorError::Indices(indices.len(), rank));
        }

        let mut tensor = self;
        let (&last, path) = indices.split_last().ok_or(TensorError::Indices(0, rank))?;
        for &index in path {
            tensor = match tensor {
                Tensor::Nested(tensors) => tensors
                    .get(index)
                    .ok_or(TensorError::Index(index, tensors.len()))?,
                Tensor::Flat(_) => return Err(TensorError::Indices(indices.len(), rank)),
            };
        }
        tensor.get(last)
    }

    #[inline]
    pub fn x(&self) -> Option<Element> {
        self.get(0).ok()
    }

    #[inline]
    pub fn y(&self) -> Option<Element> {
        self.get(1).ok()
    }

    #[inline]
    pub fn z(&self) -> Option<Element> {
        self.get(2).ok()
    }
}

fn mixed_error(item: impl std::fmt::Display) -> TensorError {
    TensorError::Type(format!("numbers and tensors are mixed at {item}"))
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{Element, Tensor, TensorError};

    #[test]
    fn test_get() -> Result<(), Box<dyn Error>> {
        let tensor = Tensor::create([0, 1, 2])?;
        assert_eq!(tensor.get(2)?, Element::Scalar(2.0));
        assert_eq!(tensor.get(3), Err(TensorError::Index(3, 3)));
        assert_eq!(Tensor::create([1])?.get(1), Err(TensorError::Index(1, 1)));

        let tensor = Tensor::create([[0, 2], [3, 4]])?;
        let row0 = tensor.get(0)?.into_tensor().ok_or("row 0 is not a tensor")?;
        let row1 = tensor.get(1)?.into_tensor().ok_or("row 1 is not a tensor")?;
        assert_eq!(row0.get(0)?, Element::Scalar(0.0));
        assert_eq!(row0.get(1)?, Element::Scalar(2.0));
        assert_eq!(row1.get(0)?, Element::Scalar(3.0));
        assert_eq!(row1.get(1)?, Element::Scalar(4.0));
        Ok(())
    }

    #[test]
    fn test_get_at() -> Result<(), Box<dyn Error>> {
        let tensor = Tensor::create([[0, 2], [3, 4]])?;
        assert_eq!(tensor.get_at(&[0, 0])?, Element::Scalar(0.0));
        assert_eq!(tensor.get_at(&[0, 1])?, Element::Scalar(2.0));
        assert_eq!(tensor.get_at(&[1, 0])?, Element::Scalar(3.0));
        assert_eq!(tensor.get_at(&[1, 1])?, Element::Scalar(4.0));
        assert_eq!(tensor.get_at(&[1])?, Element::Tensor(Tensor::create([3, 4])?));

        assert_eq!(tensor.get_at(&[0, 0, 0]), Err(TensorError::Indices(3, 2)));
        assert_eq!(tensor.get_at(&[]), Err(TensorError::Indices(0, 2)));
        assert_eq!(tensor.get_at(&[2, 0]), Err(TensorError::Index(2, 2)));
        assert_eq!(tensor.get_at(&[0, 5]), Err(TensorError::Index(5, 2)));
        Ok(())
    }

    #[test]
    fn test_xyz() -> Result<(), Box<dyn Error>> {
        let (x, y, z) = (1.01, -39.01, 1093.1239);

        let tensor = Tensor::create(Vec::<f64>::new())?;
        assert_eq!(tensor.x(), None);

        let tensor = Tensor::create([x, y, z])?;
        assert_eq!(tensor.x(), Some(Element::Scalar(x)));
        assert_eq!(tensor.y(), Some(Element::Scalar(y)));
        assert_eq!(tensor.z(), Some(Element::Scalar(z)));

        let tensor = Tensor::create([[x, y]])?;
        assert_eq!(tensor.x(), Some(Element::Tensor(Tensor::create([x, y])?)));
        assert_eq!(tensor.y(), None);
        Ok(())
    }

    #[test]
    fn test_from_elements() -> Result<(), Box<dyn Error>> {
        let tensor = Tensor::from_elements(vec![1.0.into(), 2.0.into()])?;
        assert_eq!(tensor, Tensor::create([1, 2])?);

        let tensor = Tensor::from_elements(vec![])?;
        assert_eq!(tensor.rank(), 1);
        assert!(tensor.is_empty());

        let row = Tensor::create([1, 2])?;
        let result = Tensor::from_elements(vec![row.into(), 3.0.into()]);
        assert!(matches!(result, Err(TensorError::Type(_))));
        Ok(())
    }

    #[test]
    fn test_display() -> Result<(), Box<dyn Error>> {
        assert_eq!(Tensor::create([1, 2])?.to_string(), "[1,2]");
        assert_eq!(Tensor::create([[1, 2], [3, 4]])?.to_string(), "[[1,2],[3,4]]");
        assert_eq!(Tensor::create([0.5, -1.25])?.to_string(), "[0.5,-1.25]");
        assert_eq!(Tensor::default().to_string(), "[]");
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), Box<dyn Error>> {
        let tensor = Tensor::create([[1.5, 2.0], [3.0, 4.0]])?;
        let json = serde_json::to_string(&tensor)?;
        assert_eq!(json, "[[1.5,2.0],[3.0,4.0]]");

        let back: Tensor = serde_json::from_str(&json)?;
        assert_eq!(back, tensor);
        assert_eq!(back.shape(), tensor.shape());

        let back: Tensor = serde_json::from_str("[]")?;
        assert_eq!(back, Tensor::default());
        assert!(matches!(back, Tensor::Flat(_)));
        Ok(())
    }

    #[cfg(all(feature = "serde", feature = "strict"))]
    #[test]
    fn test_serde_strict() {
        let result = serde_json::from_str::<Tensor>("[[1,2],[3]]");
        assert!(result.is_err());
        let result = serde_json::from_str::<Tensor>("[[[1],[2]],[[3],[4,5]]]");
        assert!(result.is_err());
    }

    #[cfg(all(feature = "serde", not(feature = "strict")))]
    #[test]
    fn test_serde_jagged() -> Result<(), Box<dyn Error>> {
        let tensor: Tensor = serde_json::from_str("[[1,2],[3]]")?;
        assert!(tensor.validate().is_err());
        Ok(())
    }
}
