pub(crate) mod gauss;
pub(crate) mod householder;
pub(crate) mod pseudoinverse;
pub(crate) mod svd;

pub use householder::Bidiagonal;
pub use svd::Svd;

/// Errors from linear algebra operations.
///
/// Operations that can fail run on a working copy; on error the receiving
/// matrix is left untouched.
///
/// ```
/// use linmat::{Layout, Matrix};
/// use linmat::linalg::LinalgError;
///
/// let singular = Matrix::from_flat(2, 2, &[1.0_f64, 2.0, 2.0, 4.0], Layout::RowMajor).unwrap();
/// assert_eq!(singular.invert().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operation requires a square matrix. Shape given as width x height.
    NotSquare { columns: usize, rows: usize },
    /// Gauss-Jordan reduction requires at least as many columns as rows.
    NotEnoughColumns { columns: usize, rows: usize },
    /// Matrix is singular; no usable pivot was found.
    Singular,
    /// SVD requires at least as many rows as columns.
    MoreColumnsThanRows { columns: usize, rows: usize },
    /// Implicit-shift QR did not converge for the singular value at
    /// `index` within `iterations` sweeps.
    ConvergenceFailure { index: usize, iterations: usize },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::NotSquare { columns, rows } => {
                write!(f, "operation requires a square matrix, got {}x{}", columns, rows)
            }
            LinalgError::NotEnoughColumns { columns, rows } => {
                write!(
                    f,
                    "reduction requires columns >= rows, got {}x{}",
                    columns, rows
                )
            }
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::MoreColumnsThanRows { columns, rows } => {
                write!(
                    f,
                    "decomposition requires rows >= columns, got {}x{}",
                    columns, rows
                )
            }
            LinalgError::ConvergenceFailure { index, iterations } => {
                write!(
                    f,
                    "singular value {} did not converge within {} iterations",
                    index, iterations
                )
            }
        }
    }
}
