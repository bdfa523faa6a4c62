use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

impl<T: FloatScalar> Matrix<T> {
    /// Moore-Penrose pseudoinverse via the singular value decomposition.
    ///
    /// Wide matrices are transposed first so the SVD precondition holds,
    /// and the result is transposed back. Singular values with magnitude
    /// at most `1e-15` are treated as zero and left uninverted, the
    /// rank-deficient Moore-Penrose convention.
    ///
    /// For an invertible square matrix the pseudoinverse coincides with
    /// the inverse up to rounding.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_flat(2, 2, &[2.0_f64, 0.0, 0.0, 4.0], Layout::RowMajor).unwrap();
    /// let pinv = m.pseudoinverse().unwrap();
    /// assert!((pinv[(0, 0)] - 0.5).abs() < 1e-12);
    /// assert!((pinv[(1, 1)] - 0.25).abs() < 1e-12);
    /// ```
    pub fn pseudoinverse(&self) -> Result<Self, LinalgError> {
        let wide = self.width() > self.height();
        let svd = if wide {
            self.transpose().svd()?
        } else {
            self.svd()?
        };
        let (u, mut sigma, v) = svd.into_parts();

        let cutoff = T::from(1.0e-15).unwrap_or_else(T::epsilon);
        for i in 0..sigma.width() {
            let value = sigma[(i, i)];
            if value.abs() > cutoff {
                sigma[(i, i)] = T::one() / value;
            }
        }

        let pinv = &(&v * &sigma) * &u.transpose();
        if wide {
            Ok(pinv.transpose())
        } else {
            Ok(pinv)
        }
    }
}
