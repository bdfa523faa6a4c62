mod block;
mod ops;
mod util;
mod vector;

pub use ops::MulBackend;
pub use vector::Vector;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

/// Errors from matrix construction and element access.
///
/// ```
/// use linmat::{Matrix, MatrixError};
///
/// let err = Matrix::<f64>::zeros(0, 3).unwrap_err();
/// assert_eq!(err, MatrixError::EmptyDimensions { columns: 0, rows: 3 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Construction with fewer than one column or one row.
    EmptyDimensions { columns: usize, rows: usize },
    /// Construction data length does not match the requested shape.
    DataLength { expected: usize, got: usize },
    /// Cell index outside `[0, width) x [0, height)`.
    OutOfRange {
        column: usize,
        row: usize,
        width: usize,
        height: usize,
    },
    /// Operand shapes are incompatible. Shapes are `(width, height)`.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Width or height is not evenly divisible by the block size.
    UnevenBlocks {
        block_size: usize,
        width: usize,
        height: usize,
    },
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::EmptyDimensions { columns, rows } => {
                write!(
                    f,
                    "at least one column and one row required, got {}x{}",
                    columns, rows
                )
            }
            MatrixError::DataLength { expected, got } => {
                write!(f, "data length {} does not match, expected {}", got, expected)
            }
            MatrixError::OutOfRange {
                column,
                row,
                width,
                height,
            } => {
                write!(
                    f,
                    "cell ({}, {}) out of range for a {}x{} matrix",
                    column, row, width, height
                )
            }
            MatrixError::ShapeMismatch { left, right } => {
                write!(
                    f,
                    "shape mismatch: {}x{} vs {}x{}",
                    left.0, left.1, right.0, right.1
                )
            }
            MatrixError::UnevenBlocks {
                block_size,
                width,
                height,
            } => {
                write!(
                    f,
                    "{}x{} matrix is not divisible into {2}x{2} blocks",
                    width, height, block_size
                )
            }
        }
    }
}

/// Order of a flat or nested data array handed to a constructor.
///
/// `RowMajor` means the first `width` values form the first row;
/// `ColumnMajor` means the first `height` values form the first column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    RowMajor,
    ColumnMajor,
}

/// Dense rectangular matrix with runtime dimensions.
///
/// Column-major `Vec<T>` storage; cells are addressed by `(column, row)`.
/// The shape is fixed at construction — exactly `width * height` cells,
/// mutated only through [`Matrix::set`] / `IndexMut`. Equality is exact
/// elementwise value equality.
///
/// The container is generic over its cell type: cells are usually numbers,
/// but a `Matrix<Matrix<T>>` of uniform blocks drives blockwise
/// multiplication (see [`Matrix::to_blocks`]).
///
/// # Examples
///
/// ```
/// use linmat::{Layout, Matrix};
///
/// let m = Matrix::from_flat(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], Layout::RowMajor).unwrap();
/// assert_eq!(m.width(), 3);
/// assert_eq!(m.height(), 2);
/// assert_eq!(m[(2, 0)], 3.0);
/// assert_eq!(m[(0, 1)], 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create a `columns x rows` matrix of zeros.
    ///
    /// ```
    /// use linmat::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3).unwrap();
    /// assert_eq!(m.width(), 2);
    /// assert_eq!(m.height(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(columns: usize, rows: usize) -> Result<Self, MatrixError> {
        Self::check_dims(columns, rows)?;
        Ok(Self::raw_zeros(columns, rows))
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use linmat::Matrix;
    /// let id = Matrix::<f64>::identity(3).unwrap();
    /// assert_eq!(id[(0, 0)], 1.0);
    /// assert_eq!(id[(1, 0)], 0.0);
    /// assert_eq!(id[(2, 2)], 1.0);
    /// ```
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        Self::check_dims(n, n)?;
        Ok(Self::eye_unchecked(n))
    }

    /// Create a matrix from a flat slice of `columns * rows` values.
    ///
    /// The `layout` flag states whether the slice packs rows or columns
    /// together.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let by_rows = Matrix::from_flat(2, 2, &[1, 2, 3, 4], Layout::RowMajor).unwrap();
    /// let by_cols = Matrix::from_flat(2, 2, &[1, 3, 2, 4], Layout::ColumnMajor).unwrap();
    /// assert_eq!(by_rows, by_cols);
    /// ```
    pub fn from_flat(
        columns: usize,
        rows: usize,
        data: &[T],
        layout: Layout,
    ) -> Result<Self, MatrixError> {
        Self::check_dims(columns, rows)?;
        if data.len() != columns * rows {
            return Err(MatrixError::DataLength {
                expected: columns * rows,
                got: data.len(),
            });
        }
        let m = match layout {
            Layout::ColumnMajor => Self::raw(columns, rows, data.to_vec()),
            Layout::RowMajor => {
                let mut cells = vec![T::zero(); columns * rows];
                for row in 0..rows {
                    for col in 0..columns {
                        cells[col * rows + row] = data[row * columns + col];
                    }
                }
                Self::raw(columns, rows, cells)
            }
        };
        Ok(m)
    }

    /// Create a matrix from a nested array (a list of rows or of columns,
    /// per `layout`).
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_nested(3, 2, &[vec![1, 2, 3], vec![4, 5, 6]], Layout::RowMajor).unwrap();
    /// assert_eq!(m[(0, 1)], 4);
    /// assert_eq!(m[(2, 0)], 3);
    /// ```
    pub fn from_nested(
        columns: usize,
        rows: usize,
        nested: &[Vec<T>],
        layout: Layout,
    ) -> Result<Self, MatrixError> {
        Self::check_dims(columns, rows)?;
        let (outer, inner) = match layout {
            Layout::RowMajor => (rows, columns),
            Layout::ColumnMajor => (columns, rows),
        };
        if nested.len() != outer {
            return Err(MatrixError::DataLength {
                expected: outer,
                got: nested.len(),
            });
        }
        for part in nested {
            if part.len() != inner {
                return Err(MatrixError::DataLength {
                    expected: inner,
                    got: part.len(),
                });
            }
        }
        let mut m = Self::raw_zeros(columns, rows);
        for (i, part) in nested.iter().enumerate() {
            for (j, &value) in part.iter().enumerate() {
                match layout {
                    Layout::RowMajor => m[(j, i)] = value,
                    Layout::ColumnMajor => m[(i, j)] = value,
                }
            }
        }
        Ok(m)
    }

    /// Copy the cells out into a nested array in the requested layout.
    pub fn to_nested(&self, layout: Layout) -> Vec<Vec<T>> {
        let (outer, inner) = match layout {
            Layout::RowMajor => (self.height, self.width),
            Layout::ColumnMajor => (self.width, self.height),
        };
        let mut nested = Vec::with_capacity(outer);
        for i in 0..outer {
            let mut part = Vec::with_capacity(inner);
            for j in 0..inner {
                part.push(match layout {
                    Layout::RowMajor => self[(j, i)],
                    Layout::ColumnMajor => self[(i, j)],
                });
            }
            nested.push(part);
        }
        nested
    }

    fn check_dims(columns: usize, rows: usize) -> Result<(), MatrixError> {
        if columns < 1 || rows < 1 {
            return Err(MatrixError::EmptyDimensions { columns, rows });
        }
        Ok(())
    }

    pub(crate) fn raw_zeros(width: usize, height: usize) -> Self {
        Self {
            data: vec![T::zero(); width * height],
            width,
            height,
        }
    }

    pub(crate) fn eye_unchecked(n: usize) -> Self {
        let mut m = Self::raw_zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }
}

impl<T> Matrix<T> {
    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Borrow the cell at `(column, row)`.
    ///
    /// ```
    /// use linmat::{Matrix, MatrixError};
    /// let m = Matrix::<f64>::identity(2).unwrap();
    /// assert_eq!(m.get(1, 1), Ok(&1.0));
    /// assert!(matches!(m.get(2, 0), Err(MatrixError::OutOfRange { .. })));
    /// ```
    pub fn get(&self, column: usize, row: usize) -> Result<&T, MatrixError> {
        self.check_index(column, row)?;
        Ok(&self.data[column * self.height + row])
    }

    /// Overwrite the cell at `(column, row)`.
    ///
    /// ```
    /// use linmat::Matrix;
    /// let mut m = Matrix::<f64>::zeros(2, 2).unwrap();
    /// m.set(0, 1, 5.0).unwrap();
    /// assert_eq!(m[(0, 1)], 5.0);
    /// assert!(m.set(0, 2, 1.0).is_err());
    /// ```
    pub fn set(&mut self, column: usize, row: usize, value: T) -> Result<(), MatrixError> {
        self.check_index(column, row)?;
        self.data[column * self.height + row] = value;
        Ok(())
    }

    fn check_index(&self, column: usize, row: usize) -> Result<(), MatrixError> {
        if column >= self.width || row >= self.height {
            return Err(MatrixError::OutOfRange {
                column,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub(crate) fn raw(width: usize, height: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }
}

// ── Index by (column, row) ──────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (column, row): (usize, usize)) -> &T {
        &self.data[column * self.height + row]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (column, row): (usize, usize)) -> &mut T {
        &mut self.data[column * self.height + row]
    }
}
