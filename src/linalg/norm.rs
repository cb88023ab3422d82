use crate::tensor::{Tensor, TensorError};

impl Tensor {
    fn check_vector(&self, op: &'static str) -> Result<(), TensorError> {
        match self.rank() {
            1 => Ok(()),
            rank => Err(TensorError::Rank { op, max: 1, rank }),
        }
    }

    /// Euclidean length of a rank 1 tensor. Fails with [`TensorError::Rank`] otherwise.
    #[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip_all))]
    pub fn magnitude(&self) -> Result<f64, TensorError> {
        self.check_vector("magnitude")?;
        if self.is_empty() {
            return Ok(0.0);
        }
        Ok(self.cascade_reduce(0.0, |acc, x| acc + x * x).sqrt())
    }

    /// Scales a rank 1 tensor to unit length.
    #[inline]
    pub fn normalise(&self) -> Result<Tensor, TensorError> {
        self.normalise_to(1.0)
    }

    /// Scales a rank 1 tensor to length `magnitude`. A zero vector is returned unchanged.
    #[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip(self)))]
    pub fn normalise_to(&self, magnitude: f64) -> Result<Tensor, TensorError> {
        self.check_vector("normalise")?;
        let length = self.magnitude()?;
        if length == 0.0 {
            log::debug!("normalising zero vector {self}, returned as is");
            return Ok(self.clone());
        }
        Ok(self.multiply_scalar(magnitude / length))
    }
}
