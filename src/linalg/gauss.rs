use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

impl<T: FloatScalar> Matrix<T> {
    /// Reduce to row echelon form by Gauss-Jordan elimination.
    ///
    /// Requires at least as many columns as rows. The receiver is not
    /// modified; the reduced matrix is returned. When a pivot is zero the
    /// rows below are scanned for the first usable replacement; if none
    /// exists the matrix is singular.
    ///
    /// The pivot search deliberately takes the first nonzero candidate
    /// rather than the largest-magnitude one, so reductions of integer
    /// valued matrices stay exactly reproducible.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_flat(4, 2, &[2.0, 0.0, 4.0, 0.0, 0.0, 1.0, 0.0, 3.0], Layout::RowMajor)
    ///     .unwrap();
    /// let r = m.gauss_jordan().unwrap();
    /// assert_eq!(r[(0, 0)], 1.0);
    /// assert_eq!(r[(2, 0)], 2.0);
    /// assert_eq!(r[(1, 1)], 1.0);
    /// ```
    pub fn gauss_jordan(&self) -> Result<Self, LinalgError> {
        let width = self.width();
        let height = self.height();
        if width < height {
            return Err(LinalgError::NotEnoughColumns {
                columns: width,
                rows: height,
            });
        }
        let mut work = self.clone();

        for offset in 0..height {
            // Pivot is zero: look below for the first row with a nonzero
            // entry in the pivot column.
            if work[(offset, offset)] == T::zero() {
                for i in (offset + 1)..height {
                    if work[(offset, i)] != T::zero() {
                        for j in offset..width {
                            let tmp = work[(j, offset)];
                            work[(j, offset)] = work[(j, i)];
                            work[(j, i)] = tmp;
                        }
                        break;
                    }
                }
            }

            let divider = work[(offset, offset)];
            if divider == T::zero() {
                return Err(LinalgError::Singular);
            }
            for j in offset..width {
                work[(j, offset)] = work[(j, offset)] / divider;
            }
            // Clear the pivot column below.
            for i in (offset + 1)..height {
                let multi = work[(offset, i)];
                for j in offset..width {
                    work[(j, i)] = work[(j, i)] - work[(j, offset)] * multi;
                }
            }
        }

        // Clear above the diagonal.
        for i in 1..height {
            for j in 0..i {
                let multi = work[(i, j)];
                for col in i..width {
                    work[(col, j)] = work[(col, j)] - work[(col, i)] * multi;
                }
            }
        }
        Ok(work)
    }

    /// Invert a square matrix by reducing `[self | I]`.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_flat(2, 2, &[1.0, 2.0, 3.0, 4.0], Layout::RowMajor).unwrap();
    /// let inv = m.invert().unwrap();
    /// assert_eq!(inv[(0, 0)], -2.0);
    /// assert_eq!(inv[(1, 0)], 1.0);
    /// ```
    pub fn invert(&self) -> Result<Self, LinalgError> {
        let n = self.width();
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                columns: n,
                rows: self.height(),
            });
        }
        // Augment with the identity on the right.
        let mut augmented = Matrix::raw_zeros(2 * n, n);
        for col in 0..n {
            for row in 0..n {
                augmented[(col, row)] = self[(col, row)];
            }
            augmented[(n + col, col)] = T::one();
        }
        let reduced = augmented.gauss_jordan()?;

        let mut inverse = Matrix::raw_zeros(n, n);
        for col in 0..n {
            for row in 0..n {
                inverse[(col, row)] = reduced[(n + col, row)];
            }
        }
        Ok(inverse)
    }
}
