use crate::tensor::{Tensor, TensorError};

impl Tensor {
    /// Element-wise sum. Fails with [`TensorError::ShapeMismatch`] on unequal shapes.
    #[inline]
    pub fn add(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        self.zip(other, |x, y| x + y)
    }

    /// Adds `value` to every leaf, by way of a uniform tensor of the same shape.
    pub fn add_scalar(&self, value: f64) -> Result<Tensor, TensorError> {
        let other = Tensor::with_dimensions(&self.shape(), value)?;
        self.add(&other)
    }

    #[inline]
    pub fn sub(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        self.add(&other.negate())
    }

    #[inline]
    pub fn sub_scalar(&self, value: f64) -> Result<Tensor, TensorError> {
        self.add_scalar(-value)
    }

    #[inline]
    pub fn negate(&self) -> Tensor {
        self.cascade_map(|x| -x)
    }

    #[inline]
    pub fn multiply_scalar(&self, value: f64) -> Tensor {
        self.cascade_map(|x| x * value)
    }

    #[inline]
    pub fn multiply_element_wise(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        self.zip(other, |x, y| x * y)
    }

    /// Divides every leaf by `value`. Division by zero follows IEEE 754.
    #[inline]
    pub fn divide_scalar(&self, value: f64) -> Tensor {
        self.cascade_map(|x| x / value)
    }

    /// Deep comparison. Tensors of different shapes are unequal; this never fails.
    pub fn equals(&self, other: &Tensor) -> bool {
        if !self.same_shape(other) {
            return false;
        }
        self.zip(other, |x, y| f64::from(x == y))
            .map(|mask| mask.cascade_reduce(true, |acc, x| acc && x == 1.0))
            .unwrap_or(false)
    }

    #[inline]
    pub fn floor(&self) -> Tensor {
        self.cascade_map(f64::floor)
    }
}

macro_rules! impl_scalar_op {
    ($t:ident, $f:ident, $op:ident) => {
        impl std::ops::$t<f64> for Tensor {
            type Output = Tensor;

            #[inline]
            fn $f(self, rhs: f64) -> Self::Output {
                self.$op(rhs)
            }
        }

        impl std::ops::$t<f64> for &Tensor {
            type Output = Tensor;

            #[inline]
            fn $f(self, rhs: f64) -> Self::Output {
                self.$op(rhs)
            }
        }
    };
}

impl_scalar_op!(Mul, mul, multiply_scalar);
impl_scalar_op!(Div, div, divide_scalar);

impl std::ops::Neg for Tensor {
    type Output = Tensor;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Neg for &Tensor {
    type Output = Tensor;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}
