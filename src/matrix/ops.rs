use alloc::vec;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::traits::{Cell, FloatScalar, Scalar};

use super::{Matrix, MatrixError};

/// Strategy for computing a matrix product.
///
/// An explicit value chosen per call; the crate holds no global
/// optimization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulBackend {
    /// Plain triple-loop multiplication.
    Naive,
    /// Split both operands into `block_size x block_size` blocks and
    /// multiply block-by-block. Exact for integer cells; both operands
    /// must divide evenly into blocks.
    Blockwise { block_size: usize },
}

// ── Fallible arithmetic methods ─────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Element-wise sum. Shapes must match.
    ///
    /// The `try_` name keeps this distinct from [`Add`]: a plain `add`
    /// call on an owned matrix would resolve to the operator impl.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let a = Matrix::from_flat(2, 2, &[1, 2, 3, 4], Layout::RowMajor).unwrap();
    /// let b = Matrix::from_flat(2, 2, &[5, 6, 7, 8], Layout::RowMajor).unwrap();
    /// let c = a.try_add(&b).unwrap();
    /// assert_eq!(c[(0, 0)], 6);
    /// assert_eq!(c[(1, 1)], 12);
    /// ```
    pub fn try_add(&self, rhs: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(rhs)?;
        Ok(self + rhs)
    }

    /// Element-wise difference. Shapes must match.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(rhs)?;
        Ok(self - rhs)
    }

    /// Multiply every cell by `factor`.
    pub fn scalar_multiply(&self, factor: T) -> Self {
        self * factor
    }

    /// Transpose: `(width x height)` → `(height x width)`.
    ///
    /// A pure permutation of the cells — transposing twice returns a
    /// matrix exactly equal to the original.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let a = Matrix::from_flat(3, 2, &[1, 2, 3, 4, 5, 6], Layout::RowMajor).unwrap();
    /// let t = a.transpose();
    /// assert_eq!(t.width(), 2);
    /// assert_eq!(t.height(), 3);
    /// assert_eq!(t[(0, 2)], 3);
    /// assert_eq!(t.transpose(), a);
    /// ```
    pub fn transpose(&self) -> Self {
        let mut out = Self::raw_zeros(self.height, self.width);
        for col in 0..self.width {
            for row in 0..self.height {
                out[(row, col)] = self[(col, row)];
            }
        }
        out
    }

    fn check_same_shape(&self, rhs: &Self) -> Result<(), MatrixError> {
        if (self.width, self.height) != (rhs.width, rhs.height) {
            return Err(MatrixError::ShapeMismatch {
                left: (self.width, self.height),
                right: (rhs.width, rhs.height),
            });
        }
        Ok(())
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Divide every cell by `divisor`. Restricted to floats so the
    /// quotient never truncates.
    pub fn divide(&self, divisor: T) -> Self {
        self / divisor
    }
}

// ── Product kernel, generic over the cell type ──────────────────────

impl<T: Cell> Matrix<T> {
    /// Matrix product: `(N x M) * (P x N)` → `(P x M)` (shapes as
    /// width x height). Requires `self.width == rhs.height`.
    ///
    /// The kernel is written against [`Cell`], so it serves both plain
    /// numeric matrices and block matrices whose cells are themselves
    /// matrices.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let a = Matrix::from_flat(2, 2, &[1, 2, 3, 4], Layout::RowMajor).unwrap();
    /// let b = Matrix::from_flat(2, 2, &[5, 6, 7, 8], Layout::RowMajor).unwrap();
    /// let c = a.matrix_multiply(&b).unwrap();
    /// assert_eq!(c[(0, 0)], 19);
    /// assert_eq!(c[(0, 1)], 43);
    /// assert_eq!(c[(1, 1)], 50);
    /// ```
    pub fn matrix_multiply(&self, rhs: &Self) -> Result<Self, MatrixError> {
        if self.width != rhs.height {
            return Err(MatrixError::ShapeMismatch {
                left: (self.width, self.height),
                right: (rhs.width, rhs.height),
            });
        }
        Ok(self.raw_mul(rhs))
    }

    pub(crate) fn raw_mul(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.width, rhs.height);
        let zero = self.data[0].zero_like();
        let mut data = vec![zero; rhs.width * self.height];
        for col in 0..rhs.width {
            for k in 0..self.width {
                let b_kc = &rhs[(col, k)];
                for row in 0..self.height {
                    let cell = &mut data[col * self.height + row];
                    *cell = cell.cell_add(&self[(k, row)].cell_mul(b_kc));
                }
            }
        }
        Self::raw(rhs.width, self.height, data)
    }

    pub(crate) fn raw_add(&self, rhs: &Self) -> Self {
        debug_assert_eq!((self.width, self.height), (rhs.width, rhs.height));
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| a.cell_add(b))
            .collect();
        Self::raw(self.width, self.height, data)
    }
}

impl<T: Scalar + Cell> Matrix<T> {
    /// Matrix product through an explicitly chosen backend.
    ///
    /// ```
    /// use linmat::{Layout, Matrix, MulBackend};
    /// let a = Matrix::from_flat(2, 2, &[1, 2, 3, 4], Layout::RowMajor).unwrap();
    /// let b = Matrix::from_flat(2, 2, &[5, 6, 7, 8], Layout::RowMajor).unwrap();
    /// let naive = a.multiply_with(&b, MulBackend::Naive).unwrap();
    /// let blocked = a.multiply_with(&b, MulBackend::Blockwise { block_size: 1 }).unwrap();
    /// assert_eq!(naive, blocked);
    /// ```
    pub fn multiply_with(&self, rhs: &Self, backend: MulBackend) -> Result<Self, MatrixError> {
        match backend {
            MulBackend::Naive => self.matrix_multiply(rhs),
            MulBackend::Blockwise { block_size } => self.blockwise_multiply(rhs, block_size),
        }
    }
}

// ── Element-wise addition ───────────────────────────────────────────

impl<T: Scalar> Add for Matrix<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: Scalar> Add<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self + rhs
    }
}

impl<T: Scalar> Add<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: Matrix<T>) -> Matrix<T> {
        self + &rhs
    }
}

impl<T: Scalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            (self.width, self.height),
            (rhs.width, rhs.height),
            "shape mismatch: {}x{} + {}x{}",
            self.width,
            self.height,
            rhs.width,
            rhs.height,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a + b)
            .collect();
        Matrix::raw(self.width, self.height, data)
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar> Sub for Matrix<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: Scalar> Sub<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self - rhs
    }
}

impl<T: Scalar> Sub<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: Matrix<T>) -> Matrix<T> {
        self - &rhs
    }
}

impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            (self.width, self.height),
            (rhs.width, rhs.height),
            "shape mismatch: {}x{} - {}x{}",
            self.width,
            self.height,
            rhs.width,
            rhs.height,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        Matrix::raw(self.width, self.height, data)
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar> Neg for Matrix<T> {
    type Output = Self;
    fn neg(self) -> Self {
        -&self
    }
}

impl<T: Scalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;
    fn neg(self) -> Matrix<T> {
        let data = self.data.iter().map(|&x| T::zero() - x).collect();
        Matrix::raw(self.width, self.height, data)
    }
}

// ── Matrix multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul for Matrix<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> Mul<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self * &rhs
    }
}

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.width, rhs.height,
            "shape mismatch: {}x{} * {}x{}",
            self.width, self.height, rhs.width, rhs.height,
        );
        let m = self.height;
        let n = self.width;
        let p = rhs.width;
        let mut data = vec![T::zero(); p * m];
        for col in 0..p {
            for k in 0..n {
                let b_kc = rhs.data[col * n + k];
                for row in 0..m {
                    data[col * m + row] = data[col * m + row] + self.data[k * m + row] * b_kc;
                }
            }
        }
        Matrix::raw(p, m, data)
    }
}

// ── Scalar multiplication and division ──────────────────────────────

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        &self * rhs
    }
}

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: T) -> Matrix<T> {
        let data = self.data.iter().map(|&x| x * rhs).collect();
        Matrix::raw(self.width, self.height, data)
    }
}

impl<T: Scalar> Div<T> for Matrix<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        &self / rhs
    }
}

impl<T: Scalar> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;
    fn div(self, rhs: T) -> Matrix<T> {
        let data = self.data.iter().map(|&x| x / rhs).collect();
        Matrix::raw(self.width, self.height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Layout;

    fn m2(cells: [i64; 4]) -> Matrix<i64> {
        Matrix::from_flat(2, 2, &cells, Layout::RowMajor).unwrap()
    }

    #[test]
    fn add_sub() {
        let a = m2([1, 2, 3, 4]);
        let b = m2([5, 6, 7, 8]);

        let c = a.try_add(&b).unwrap();
        assert_eq!(c, m2([6, 8, 10, 12]));

        let d = b.try_sub(&a).unwrap();
        assert_eq!(d, m2([4, 4, 4, 4]));

        // `a` and `b` are owned here, so a bare `add` would pick up the
        // panicking operator impl instead of the fallible method.
        assert_eq!(a + b, c);
    }

    #[test]
    fn add_shape_mismatch() {
        let a = Matrix::<i64>::zeros(2, 3).unwrap();
        let b = Matrix::<i64>::zeros(2, 2).unwrap();
        assert_eq!(
            a.try_add(&b).unwrap_err(),
            MatrixError::ShapeMismatch {
                left: (2, 3),
                right: (2, 2)
            }
        );
    }

    #[test]
    fn neg() {
        let a = m2([1, -2, 3, -4]);
        assert_eq!(-&a, m2([-1, 2, -3, 4]));
    }

    #[test]
    fn matrix_multiply() {
        let a = m2([1, 2, 3, 4]);
        let b = m2([5, 6, 7, 8]);
        let c = a.matrix_multiply(&b).unwrap();
        assert_eq!(c, m2([19, 22, 43, 50]));
    }

    #[test]
    fn matrix_multiply_non_square() {
        // 2 rows x 3 cols times 3 rows x 2 cols
        let a = Matrix::from_flat(3, 2, &[1, 2, 3, 4, 5, 6], Layout::RowMajor).unwrap();
        let b = Matrix::from_flat(2, 3, &[7, 8, 9, 10, 11, 12], Layout::RowMajor).unwrap();
        let c = a.matrix_multiply(&b).unwrap();
        assert_eq!(c.width(), 2);
        assert_eq!(c.height(), 2);
        assert_eq!(c, m2([58, 64, 139, 154]));
    }

    #[test]
    fn matrix_multiply_mismatch() {
        let a = Matrix::<i64>::zeros(3, 2).unwrap();
        let b = Matrix::<i64>::zeros(2, 2).unwrap();
        assert!(a.matrix_multiply(&b).is_err());
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn operator_multiply_mismatch_panics() {
        let a = Matrix::<f64>::zeros(3, 2).unwrap();
        let b = Matrix::<f64>::zeros(2, 2).unwrap();
        let _ = &a * &b;
    }

    #[test]
    fn scalar_multiply_divide() {
        let a = m2([1, 2, 3, 4]);
        assert_eq!(a.scalar_multiply(3), m2([3, 6, 9, 12]));

        let b = Matrix::from_flat(2, 2, &[2.0, 4.0, 6.0, 8.0], Layout::RowMajor).unwrap();
        let half = b.divide(2.0);
        assert_eq!(half[(0, 0)], 1.0);
        assert_eq!(half[(1, 1)], 4.0);
    }

    #[test]
    fn transpose_involution() {
        let a = Matrix::from_flat(3, 2, &[1, 2, 3, 4, 5, 6], Layout::RowMajor).unwrap();
        let t = a.transpose();
        assert_eq!(t.width(), 2);
        assert_eq!(t.height(), 3);
        assert_eq!(t[(0, 2)], 3);
        assert_eq!(t[(1, 0)], 4);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn ref_variants() {
        let a = m2([1, 2, 3, 4]);
        let b = m2([5, 6, 7, 8]);
        let sum1 = &a + &b;
        let sum2 = a.clone() + &b;
        let sum3 = &a + b.clone();
        let sum4 = a.clone() + b.clone();
        assert_eq!(sum1, sum2);
        assert_eq!(sum1, sum3);
        assert_eq!(sum1, sum4);
    }

    #[test]
    fn identity_multiply() {
        let a = m2([1, 2, 3, 4]);
        let id = Matrix::<i64>::identity(2).unwrap();
        assert_eq!(&a * &id, a);
        assert_eq!(&id * &a, a);
    }

    #[test]
    fn multiply_with_backends_agree() {
        let a = Matrix::from_flat(4, 4, &(1..=16).collect::<alloc::vec::Vec<i64>>(), Layout::RowMajor)
            .unwrap();
        let b = Matrix::from_flat(4, 4, &(17..=32).collect::<alloc::vec::Vec<i64>>(), Layout::RowMajor)
            .unwrap();
        let naive = a.multiply_with(&b, MulBackend::Naive).unwrap();
        let blocked = a
            .multiply_with(&b, MulBackend::Blockwise { block_size: 2 })
            .unwrap();
        assert_eq!(naive, blocked);
    }
}
