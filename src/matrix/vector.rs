use core::ops::{Index, IndexMut};

use crate::traits::{FloatScalar, Scalar};

use super::{Matrix, MatrixError};

/// Column vector: a thin wrapper over a single-column [`Matrix`].
///
/// Conversions to and from the matrix form are explicit
/// ([`Vector::as_matrix`], [`Vector::into_matrix`],
/// [`Vector::from_matrix_column`]); a vector is not interchangeable with a
/// general matrix.
///
/// ```
/// use linmat::Vector;
/// let v = Vector::from_slice(&[3.0, 4.0]).unwrap();
/// assert_eq!(v.len(), 2);
/// assert_eq!(v[1], 4.0);
/// assert_eq!(v.norm(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    inner: Matrix<T>,
}

impl<T: Scalar> Vector<T> {
    /// Zero vector with `rows` entries.
    pub fn zeros(rows: usize) -> Result<Self, MatrixError> {
        Ok(Self {
            inner: Matrix::zeros(1, rows)?,
        })
    }

    pub(crate) fn raw_zeros(rows: usize) -> Self {
        Self {
            inner: Matrix::raw_zeros(1, rows),
        }
    }

    /// Vector holding a copy of `values`. At least one entry is required.
    pub fn from_slice(values: &[T]) -> Result<Self, MatrixError> {
        if values.is_empty() {
            return Err(MatrixError::EmptyDimensions { columns: 1, rows: 0 });
        }
        let mut v = Self::zeros(values.len())?;
        for (i, &x) in values.iter().enumerate() {
            v[i] = x;
        }
        Ok(v)
    }

    /// Copy one column out of a matrix.
    ///
    /// ```
    /// use linmat::{Layout, Matrix, Vector};
    /// let m = Matrix::from_flat(2, 2, &[1.0, 2.0, 3.0, 4.0], Layout::RowMajor).unwrap();
    /// let col = Vector::from_matrix_column(&m, 1).unwrap();
    /// assert_eq!(col[0], 2.0);
    /// assert_eq!(col[1], 4.0);
    /// ```
    pub fn from_matrix_column(matrix: &Matrix<T>, column: usize) -> Result<Self, MatrixError> {
        if column >= matrix.width() {
            return Err(MatrixError::OutOfRange {
                column,
                row: 0,
                width: matrix.width(),
                height: matrix.height(),
            });
        }
        let mut v = Self::zeros(matrix.height())?;
        for row in 0..matrix.height() {
            v[row] = matrix[(column, row)];
        }
        Ok(v)
    }
}

impl<T> Vector<T> {
    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.height()
    }

    /// A vector always holds at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Borrow the underlying single-column matrix.
    #[inline]
    pub fn as_matrix(&self) -> &Matrix<T> {
        &self.inner
    }

    /// Unwrap into the underlying single-column matrix.
    #[inline]
    pub fn into_matrix(self) -> Matrix<T> {
        self.inner
    }
}

impl<T: FloatScalar> Vector<T> {
    /// Euclidean norm.
    pub fn norm(&self) -> T {
        let mut sum = T::zero();
        for i in 0..self.len() {
            sum = sum + self[i] * self[i];
        }
        sum.sqrt()
    }

    /// Scale to unit norm. A zero vector has no direction and is returned
    /// unchanged.
    pub fn unify(&self) -> Self {
        let n = self.norm();
        if n == T::zero() {
            return self.clone();
        }
        Self {
            inner: &self.inner / n,
        }
    }
}

impl<T> From<Vector<T>> for Matrix<T> {
    fn from(v: Vector<T>) -> Self {
        v.inner
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, row: usize) -> &T {
        &self.inner[(0, row)]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut T {
        &mut self.inner[(0, row)]
    }
}
