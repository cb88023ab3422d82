use itertools::Itertools;

use crate::tensor::{Tensor, TensorError};

/// Untyped construction input: a number, a nested list, or an existing tensor.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    Number(f64),
    List(Vec<Array>),
    Tensor(Tensor),
}

impl From<f64> for Array {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Array {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<Tensor> for Array {
    #[inline]
    fn from(value: Tensor) -> Self {
        Self::Tensor(value)
    }
}

impl<T: Into<Array>> From<Vec<T>> for Array {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map_into().collect())
    }
}

impl<T: Into<Array>, const N: usize> From<[T; N]> for Array {
    #[inline]
    fn from(value: [T; N]) -> Self {
        Self::List(value.into_iter().map_into().collect())
    }
}

/// A uniform random source over `[0, 1)`.
pub trait Uniform {
    fn next(&mut self) -> f64;
}

impl Uniform for fastrand::Rng {
    #[inline]
    fn next(&mut self) -> f64 {
        self.f64()
    }
}

impl Tensor {
    /// Create a tensor from numbers and nested lists, or copy an existing tensor.
    ///
    /// Fails with [`TensorError::Type`] if the input is a bare number,
    /// or if a list mixes numbers with lists.
    pub fn create(input: impl Into<Array>) -> Result<Self, TensorError> {
        match input.into() {
            Array::Tensor(tensor) => Ok(tensor),
            Array::List(items) => Self::from_list(items),
            Array::Number(value) => Err(TensorError::Type(format!(
                "input must be a list, {value} is not a list"
            ))),
        }
    }

    /// Positional form of [`Tensor::create`]. Exactly one argument is accepted.
    pub fn create_args(args: Vec<Array>) -> Result<Self, TensorError> {
        match <[Array; 1]>::try_from(args) {
            Ok([input]) => Self::create(input),
            Err(args) => Err(TensorError::Arity(args.len(), "exactly 1")),
        }
    }

    fn from_list(items: Vec<Array>) -> Result<Self, TensorError> {
        let numbers = items
            .iter()
            .filter(|item| matches!(item, Array::Number(_)))
            .count();
        match numbers {
            0 => {
                let tensors = items.into_iter().map(Self::create).try_collect()?;
                Self::from_tensors(tensors)
            }
            n if n == items.len() => Ok(Self::Flat(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Array::Number(value) => Some(value),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => Err(TensorError::Type(
                "a list must hold either numbers or lists, not both".into(),
            )),
        }
    }

    /// Create a length 2 vector. `y` defaults to `x`.
    #[inline]
    pub fn create2(x: f64, y: Option<f64>) -> Self {
        Self::Flat(vec![x, y.unwrap_or(x)])
    }

    /// Create a 2x2 matrix from one, two or four values.
    ///
    /// - `a` alone fills all four entries.
    /// - `a, b` gives the row `[a, b]` twice.
    /// - `a, b, c, d` gives `[[a, b], [c, d]]`.
    ///
    /// Any other combination fails with [`TensorError::Arity`].
    pub fn create2x2(
        a: f64,
        b: Option<f64>,
        c: Option<f64>,
        d: Option<f64>,
    ) -> Result<Self, TensorError> {
        let [a, b, c, d] = match (b, c, d) {
            (None, None, None) => [a, a, a, a],
            (Some(b), None, None) => [a, b, a, b],
            (Some(b), Some(c), Some(d)) => [a, b, c, d],
            (b, c, d) => {
                let count = 1 + [b, c, d].iter().flatten().count();
                return Err(TensorError::Arity(count, "1, 2 or 4"));
            }
        };
        Ok(Self::Nested(vec![
            Self::Flat(vec![a, b]),
            Self::Flat(vec![c, d]),
        ]))
    }

    /// Create a length `n` vector drawn uniformly from `[min, max)`.
    #[inline]
    pub fn create_random(n: usize, min: f64, max: f64) -> Self {
        Self::create_random_with(&mut fastrand::Rng::new(), n, min, max)
    }

    /// Create a length `n` vector drawn uniformly from `[min, max)` using `rng`.
    pub fn create_random_with(rng: &mut impl Uniform, n: usize, min: f64, max: f64) -> Self {
        let scale = max - min;
        Self::Flat((0..n).map(|_| rng.next() * scale + min).collect())
    }

    /// Create a tensor of shape `dims` (outermost first) with every leaf set to `value`.
    pub fn with_dimensions(dims: &[usize], value: f64) -> Result<Self, TensorError> {
        let (&last, outer) = dims.split_last().ok_or(TensorError::Dimensions)?;
        outer
            .iter()
            .rev()
            .try_fold(Self::Flat(vec![value; last]), |tensor, &len| {
                Self::from_tensors(vec![tensor; len])
            })
    }
}
