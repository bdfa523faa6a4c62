use crate::linalg::LinalgError;
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Result of Householder bidiagonalization: `M = U * B * V` up to
/// rounding, with `B` upper bidiagonal and `U`, `V` orthogonal.
#[derive(Debug, Clone, PartialEq)]
pub struct Bidiagonal<T: FloatScalar> {
    u: Matrix<T>,
    b: Matrix<T>,
    v: Matrix<T>,
}

impl<T: FloatScalar> Bidiagonal<T> {
    /// Left orthogonal factor.
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// The bidiagonal factor.
    pub fn b(&self) -> &Matrix<T> {
        &self.b
    }

    /// Right orthogonal factor.
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Consume the decomposition, yielding `(u, b, v)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.u, self.b, self.v)
    }
}

/// Householder matrix `I - 2ww^T` with `w` the unit vector along
/// `x - y`. When `x == y` there is nothing to reflect and the identity
/// is returned.
fn reflector<T: FloatScalar>(x: &Vector<T>, y: &Vector<T>) -> Matrix<T> {
    let n = x.len();
    let mut diff = Vector::raw_zeros(n);
    for i in 0..n {
        diff[i] = x[i] - y[i];
    }
    // Zero difference stays zero under unify, yielding the identity below.
    let w = diff.unify();
    let outer = w.as_matrix() * &w.as_matrix().transpose();
    Matrix::eye_unchecked(n) - outer * (T::one() + T::one())
}

impl<T: FloatScalar> Matrix<T> {
    /// Reduce a square matrix to upper bidiagonal form with Householder
    /// reflections.
    ///
    /// Step `k` first reflects column `k` so everything below the diagonal
    /// vanishes (`U` accumulates those reflections on the left), then, for
    /// all but the last two columns, reflects row `k` so everything right
    /// of the superdiagonal vanishes (`V` accumulates on the right).
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_flat(2, 2, &[3.0_f64, 4.0, 4.0, 3.0], Layout::RowMajor).unwrap();
    /// let hh = m.householder().unwrap();
    /// let rebuilt = hh.u() * hh.b() * hh.v();
    /// assert!((rebuilt[(0, 0)] - 3.0).abs() < 1e-12);
    /// assert!(hh.b()[(0, 1)].abs() < 1e-12);
    /// ```
    pub fn householder(&self) -> Result<Bidiagonal<T>, LinalgError> {
        let n = self.width();
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                columns: n,
                rows: self.height(),
            });
        }

        let mut b = self.clone();
        let mut u = Matrix::eye_unchecked(n);
        let mut v = Matrix::eye_unchecked(n);

        for k in 0..n.saturating_sub(1) {
            // Reflect column k: zero the entries below the diagonal.
            let mut x = Vector::raw_zeros(n);
            let mut y = Vector::raw_zeros(n);
            let mut s = T::zero();
            for i in k..n {
                let val = b[(k, i)];
                x[i] = val;
                s = s + val * val;
            }
            y[k] = s.sqrt();

            let uk = reflector(&x, &y);
            b = &uk * &b;
            u = &u * &uk;

            // Reflect row k: zero the entries right of the superdiagonal.
            if k + 2 < n {
                let mut x = Vector::raw_zeros(n);
                let mut y = Vector::raw_zeros(n);
                let mut s = T::zero();
                for i in (k + 1)..n {
                    let val = b[(i, k)];
                    x[i] = val;
                    s = s + val * val;
                }
                y[k + 1] = s.sqrt();

                let vk = reflector(&x, &y);
                b = &b * &vk;
                v = &vk * &v;
            }
        }

        Ok(Bidiagonal { u, b, v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Layout;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {}", msg, a, b);
    }

    fn assert_orthogonal(m: &Matrix<f64>, tol: f64) {
        let product = m * &m.transpose();
        for col in 0..m.width() {
            for row in 0..m.height() {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert_near(product[(col, row)], expected, tol, "orthogonality");
            }
        }
    }

    #[test]
    fn reconstructs_3x3() {
        let m = Matrix::from_flat(
            3,
            3,
            &[4.0, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0],
            Layout::RowMajor,
        )
        .unwrap();
        let hh = m.householder().unwrap();
        let rebuilt = hh.u() * hh.b() * hh.v();
        for col in 0..3 {
            for row in 0..3 {
                assert_near(rebuilt[(col, row)], m[(col, row)], 1e-10, "U*B*V");
            }
        }
    }

    #[test]
    fn bidiagonal_structure() {
        let m = Matrix::from_flat(
            4,
            4,
            &[
                1.0, 5.0, 3.0, 2.0, 4.0, 6.0, 7.0, 1.0, 2.0, 8.0, 9.0, 3.0, 1.0, 1.0, 4.0, 5.0,
            ],
            Layout::RowMajor,
        )
        .unwrap();
        let hh = m.householder().unwrap();
        let b = hh.b();
        for col in 0..4 {
            for row in 0..4 {
                if col != row && col != row + 1 {
                    assert_near(b[(col, row)], 0.0, 1e-10, "off-bidiagonal");
                }
            }
        }
    }

    #[test]
    fn factors_are_orthogonal() {
        let m = Matrix::from_flat(
            3,
            3,
            &[2.0, -1.0, 3.0, 0.0, 4.0, 1.0, 5.0, 2.0, -2.0],
            Layout::RowMajor,
        )
        .unwrap();
        let hh = m.householder().unwrap();
        assert_orthogonal(hh.u(), 1e-10);
        assert_orthogonal(hh.v(), 1e-10);
    }

    #[test]
    fn one_by_one() {
        let m = Matrix::from_flat(1, 1, &[-5.0], Layout::RowMajor).unwrap();
        let hh = m.householder().unwrap();
        assert_eq!(hh.b()[(0, 0)], -5.0);
        assert_eq!(hh.u()[(0, 0)], 1.0);
        assert_eq!(hh.v()[(0, 0)], 1.0);
    }

    #[test]
    fn zero_column_is_degenerate() {
        // First column already zero below the diagonal: reflector is the
        // identity and the matrix passes through step 0 unchanged.
        let m = Matrix::from_flat(2, 2, &[0.0, 1.0, 0.0, 2.0], Layout::RowMajor).unwrap();
        let hh = m.householder().unwrap();
        let rebuilt = hh.u() * hh.b() * hh.v();
        for col in 0..2 {
            for row in 0..2 {
                assert_near(rebuilt[(col, row)], m[(col, row)], 1e-12, "U*B*V");
            }
        }
    }

    #[test]
    fn rejects_non_square() {
        let m = Matrix::<f64>::zeros(3, 2).unwrap();
        assert_eq!(
            m.householder().unwrap_err(),
            LinalgError::NotSquare { columns: 3, rows: 2 }
        );
    }
}
