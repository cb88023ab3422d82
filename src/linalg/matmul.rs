use std::borrow::Cow;

use itertools::Itertools;

use crate::tensor::{Element, Tensor, TensorError};

impl Tensor {
    /// Promotes a rank 1 tensor to a single-row matrix. Fails above rank 2.
    fn to_matrix(&self, op: &'static str) -> Result<Cow<'_, Tensor>, TensorError> {
        match self.rank() {
            1 => Ok(Cow::Owned(Tensor::Nested(vec![self.clone()]))),
            2 => Ok(Cow::Borrowed(self)),
            rank => Err(TensorError::Rank { op, max: 2, rank }),
        }
    }

    #[inline]
    fn rows(&self) -> &[Tensor] {
        match self {
            Tensor::Flat(_) => &[],
            Tensor::Nested(rows) => rows,
        }
    }

    fn entry(&self, i: usize, j: usize) -> Result<f64, TensorError> {
        match self.get_at(&[i, j])? {
            Element::Scalar(value) => Ok(value),
            Element::Tensor(tensor) => Err(TensorError::Type(format!(
                "matrix entry ({i}, {j}) is the tensor {tensor}"
            ))),
        }
    }

    /// Swaps rows and columns of a matrix.
    ///
    /// A rank 1 tensor of length `n` is read as a `[1, n]` matrix, so it transposes to `[n, 1]`.
    /// Fails with [`TensorError::Rank`] above rank 2.
    #[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip_all))]
    pub fn transpose(&self) -> Result<Tensor, TensorError> {
        let matrix = self.to_matrix("transpose")?;
        let shape = matrix.shape();
        let (rows, cols) = (shape[0], shape[1]);

        let output = (0..cols)
            .map(|j| {
                (0..rows)
                    .map(|i| matrix.entry(i, j))
                    .try_collect()
                    .map(Tensor::Flat)
            })
            .try_collect()?;
        Tensor::from_tensors(output)
    }

    /// Matrix product. Rank 1 operands are promoted to single-row matrices.
    ///
    /// For shapes `[a, b]` and `[c, d]` this requires `b == c`, and when `a != d` it also
    /// requires `a == b` and `d == 1`. Other shapes fail with [`TensorError::ShapeMismatch`].
    ///
    /// A `[1, 1]` product is returned as [`Element::Scalar`].
    #[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip_all))]
    pub fn matrix_multiply(&self, other: &Tensor) -> Result<Element, TensorError> {
        let x = self.to_matrix("matrix multiply")?;
        let y = other.to_matrix("matrix multiply")?;

        let (sx, sy) = (x.shape(), y.shape());
        let (a, b, c, d) = (sx[0], sx[1], sy[0], sy[1]);
        if b != c || (a != d && (a != b || d != 1)) {
            return Err(TensorError::ShapeMismatch(sx, sy));
        }
        log::trace!("matrix multiply {sx} x {sy}");

        // columns of `y` are the rows of its transpose
        let yt = y.transpose()?;
        let cols = yt.rows();

        let dot = |row: &Tensor, col: &Tensor| -> Result<f64, TensorError> {
            let product = row.zip(col, |x, y| x * y)?;
            Ok(product.cascade_reduce(0.0, |acc, x| acc + x))
        };
        let product_row = |row: &Tensor| -> Result<Tensor, TensorError> {
            cols.iter()
                .map(|col| dot(row, col))
                .try_collect()
                .map(Tensor::Flat)
        };

        #[cfg(not(feature = "rayon"))]
        let output: Vec<Tensor> = x.rows().iter().map(product_row).try_collect()?;
        #[cfg(feature = "rayon")]
        let output: Vec<Tensor> = {
            use rayon::prelude::*;
            x.rows()
                .par_iter()
                .map(product_row)
                .collect::<Result<Vec<_>, TensorError>>()?
        };

        match &output[..] {
            [Tensor::Flat(row)] if row.len() == 1 => {
                log::debug!("matrix product of {sx} x {sy} collapsed to a scalar");
                Ok(Element::Scalar(row[0]))
            }
            _ => Tensor::from_tensors(output).map(Element::Tensor),
        }
    }
}
