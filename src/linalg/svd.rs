use alloc::vec;

use crate::linalg::LinalgError;
use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Singular value decomposition: `M = U * Σ * V^T` up to rounding.
///
/// `Σ` is square diagonal with non-negative entries; its off-diagonal
/// cells are exactly zero. The singular values are left in the order the
/// iteration produces them, not sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Svd<T: FloatScalar> {
    u: Matrix<T>,
    sigma: Matrix<T>,
    v: Matrix<T>,
}

impl<T: FloatScalar> Svd<T> {
    /// Left factor, same shape as the decomposed matrix.
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Diagonal matrix of singular values.
    pub fn sigma(&self) -> &Matrix<T> {
        &self.sigma
    }

    /// Right factor (not transposed).
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Consume the decomposition, yielding `(u, sigma, v)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.u, self.sigma, self.v)
    }
}

/// `sqrt(a² + b²)` without destructive underflow or overflow.
fn pythag<T: FloatScalar>(a: T, b: T) -> T {
    let abs_a = a.abs();
    let abs_b = b.abs();
    if abs_a > abs_b {
        let r = abs_b / abs_a;
        abs_a * (T::one() + r * r).sqrt()
    } else if abs_b == T::zero() {
        T::zero()
    } else {
        let r = abs_a / abs_b;
        abs_b * (T::one() + r * r).sqrt()
    }
}

/// `|a|` carrying the sign of `b`; `b == 0` counts as positive.
fn sign_transfer<T: FloatScalar>(a: T, b: T) -> T {
    if b >= T::zero() {
        a.abs()
    } else {
        -a.abs()
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Singular value decomposition with the default iteration budget of
    /// 50 QR sweeps per singular value.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_flat(2, 2, &[3.0_f64, 2.0, 2.0, 3.0], Layout::RowMajor).unwrap();
    /// let svd = m.svd().unwrap();
    /// let mut values = [svd.sigma()[(0, 0)], svd.sigma()[(1, 1)]];
    /// values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert!((values[0] - 1.0).abs() < 1e-10);
    /// assert!((values[1] - 5.0).abs() < 1e-10);
    /// ```
    pub fn svd(&self) -> Result<Svd<T>, LinalgError> {
        self.svd_with(50)
    }

    /// Singular value decomposition of a matrix with `width <= height`.
    ///
    /// Classical Householder-bidiagonalization followed by implicit-shift
    /// QR on the bidiagonal form. `U` reuses the working array and has the
    /// shape of the input; `Σ` and `V` are `width x width`. If a singular
    /// value fails to settle within `max_iterations` sweeps the
    /// decomposition is abandoned and the failing index is reported.
    pub fn svd_with(&self, max_iterations: usize) -> Result<Svd<T>, LinalgError> {
        let m = self.height();
        let n = self.width();
        if n > m {
            return Err(LinalgError::MoreColumnsThanRows {
                columns: n,
                rows: m,
            });
        }

        // Tiny column norms below tol are treated as zero to keep the
        // squared sums clear of underflow.
        let tol = T::min_positive_value() / T::epsilon();

        let mut a = self.clone();
        let mut v: Matrix<T> = Matrix::raw_zeros(n, n);
        let mut w = vec![T::zero(); n];
        let mut rv1 = vec![T::zero(); n];

        // ── Householder reduction to bidiagonal form ────────────────
        let mut g = T::zero();
        let mut anorm = T::zero();

        for i in 0..n {
            let l = i + 1;
            rv1[i] = g;

            let mut s = T::zero();
            for k in i..m {
                s = s + a[(i, k)] * a[(i, k)];
            }
            if s <= tol {
                g = T::zero();
            } else {
                let f = a[(i, i)];
                g = if f < T::zero() { s.sqrt() } else { -s.sqrt() };
                let h = f * g - s;
                a[(i, i)] = f - g;
                for j in l..n {
                    let mut dot = T::zero();
                    for k in i..m {
                        dot = dot + a[(i, k)] * a[(j, k)];
                    }
                    let scale = dot / h;
                    for k in i..m {
                        a[(j, k)] = a[(j, k)] + scale * a[(i, k)];
                    }
                }
            }
            w[i] = g;

            let mut s = T::zero();
            for k in l..n {
                s = s + a[(k, i)] * a[(k, i)];
            }
            if s <= tol {
                g = T::zero();
            } else {
                let f = a[(l, i)];
                g = if f < T::zero() { s.sqrt() } else { -s.sqrt() };
                let h = f * g - s;
                a[(l, i)] = f - g;
                for k in l..n {
                    rv1[k] = a[(k, i)] / h;
                }
                for j in l..m {
                    let mut dot = T::zero();
                    for k in l..n {
                        dot = dot + a[(k, j)] * a[(k, i)];
                    }
                    for k in l..n {
                        a[(k, j)] = a[(k, j)] + dot * rv1[k];
                    }
                }
            }
            let spread = w[i].abs() + rv1[i].abs();
            if spread > anorm {
                anorm = spread;
            }
        }

        // ── Accumulation of right-hand transformations ──────────────
        // `g` carries over from the reduction loop, and `l` starts at n:
        // the first pass (i = n-1) has empty inner loops, so
        // a[(i+1, i)] is never read out of bounds.
        let mut l = n;
        for i in (0..n).rev() {
            if g != T::zero() {
                for j in l..n {
                    v[(i, j)] = a[(j, i)] / (g * a[(i + 1, i)]);
                }
                for j in l..n {
                    let mut dot = T::zero();
                    for k in l..n {
                        dot = dot + a[(k, i)] * v[(j, k)];
                    }
                    for k in l..n {
                        v[(j, k)] = v[(j, k)] + dot * v[(i, k)];
                    }
                }
            }
            for j in l..n {
                v[(j, i)] = T::zero();
                v[(i, j)] = T::zero();
            }
            v[(i, i)] = T::one();
            g = rv1[i];
            l = i;
        }

        // ── Accumulation of left-hand transformations ───────────────
        for i in (0..n).rev() {
            let l = i + 1;
            let g = w[i];
            for j in l..n {
                a[(j, i)] = T::zero();
            }
            if g != T::zero() {
                for j in l..n {
                    let mut dot = T::zero();
                    for k in l..m {
                        dot = dot + a[(i, k)] * a[(j, k)];
                    }
                    let scale = dot / (a[(i, i)] * g);
                    for k in i..m {
                        a[(j, k)] = a[(j, k)] + scale * a[(i, k)];
                    }
                }
                for j in i..m {
                    a[(i, j)] = a[(i, j)] / g;
                }
            } else {
                for j in i..m {
                    a[(i, j)] = T::zero();
                }
            }
            a[(i, i)] = a[(i, i)] + T::one();
        }

        let eps = T::epsilon() * anorm;
        let two = T::one() + T::one();

        // ── Diagonalization of the bidiagonal form ──────────────────
        for k in (0..n).rev() {
            let mut converged = false;
            for _ in 0..max_iterations {
                // Scan back for a negligible superdiagonal entry.
                // rv1[0] is always exactly zero, so the scan terminates.
                let mut l = k;
                let mut split = false;
                loop {
                    if l == 0 || rv1[l].abs() <= eps {
                        split = true;
                        break;
                    }
                    if w[l - 1].abs() <= eps {
                        break;
                    }
                    l -= 1;
                }

                if !split {
                    // Cancel rv1[l] against the negligible w[l-1].
                    let mut c = T::zero();
                    let mut s = T::one();
                    let nm = l - 1;
                    for i in l..=k {
                        let f = s * rv1[i];
                        rv1[i] = c * rv1[i];
                        if f.abs() <= eps {
                            break;
                        }
                        let g = w[i];
                        let h = pythag(f, g);
                        w[i] = h;
                        c = g / h;
                        s = -f / h;
                        for j in 0..m {
                            let y = a[(nm, j)];
                            let z = a[(i, j)];
                            a[(nm, j)] = y * c + z * s;
                            a[(i, j)] = -(y * s) + z * c;
                        }
                    }
                }

                let z = w[k];
                if l == k {
                    // Converged; flip the sign into V if needed so the
                    // singular value comes out non-negative.
                    if z < T::zero() {
                        w[k] = -z;
                        for j in 0..n {
                            v[(k, j)] = -v[(k, j)];
                        }
                    }
                    converged = true;
                    break;
                }

                // Shift from the bottom 2x2 minor.
                let mut x = w[l];
                let y = w[k - 1];
                let g0 = rv1[k - 1];
                let h = rv1[k];
                let mut f = ((y - z) * (y + z) + (g0 - h) * (g0 + h)) / (two * h * y);
                let g1 = pythag(f, T::one());
                f = ((x - z) * (x + z) + h * ((y / (f + sign_transfer(g1, f))) - h)) / x;

                // Chase the bulge with Givens rotations.
                let mut c = T::one();
                let mut s = T::one();
                for i in (l + 1)..=k {
                    let mut g = rv1[i];
                    let mut y = w[i];
                    let mut h = s * g;
                    g = c * g;
                    let mut z = pythag(f, h);
                    rv1[i - 1] = z;
                    c = f / z;
                    s = h / z;
                    f = x * c + g * s;
                    g = -(x * s) + g * c;
                    h = y * s;
                    y = y * c;
                    for jj in 0..n {
                        let vx = v[(i - 1, jj)];
                        let vz = v[(i, jj)];
                        v[(i - 1, jj)] = vx * c + vz * s;
                        v[(i, jj)] = -(vx * s) + vz * c;
                    }
                    z = pythag(f, h);
                    w[i - 1] = z;
                    if z != T::zero() {
                        let inv = T::one() / z;
                        c = f * inv;
                        s = h * inv;
                    }
                    f = c * g + s * y;
                    x = -(s * g) + c * y;
                    for jj in 0..m {
                        let ay = a[(i - 1, jj)];
                        let az = a[(i, jj)];
                        a[(i - 1, jj)] = ay * c + az * s;
                        a[(i, jj)] = -(ay * s) + az * c;
                    }
                }
                rv1[l] = T::zero();
                rv1[k] = f;
                w[k] = x;
            }

            if !converged {
                return Err(LinalgError::ConvergenceFailure {
                    index: k,
                    iterations: max_iterations,
                });
            }
        }

        let mut sigma: Matrix<T> = Matrix::raw_zeros(n, n);
        for (i, &value) in w.iter().enumerate() {
            sigma[(i, i)] = value;
        }

        Ok(Svd { u: a, sigma, v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Layout;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {}", msg, a, b);
    }

    fn singular_values(svd: &Svd<f64>) -> alloc::vec::Vec<f64> {
        let n = svd.sigma().width();
        let mut values: alloc::vec::Vec<f64> = (0..n).map(|i| svd.sigma()[(i, i)]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values
    }

    fn assert_reconstructs(m: &Matrix<f64>, svd: &Svd<f64>, tol: f64) {
        let rebuilt = svd.u() * svd.sigma() * &svd.v().transpose();
        for col in 0..m.width() {
            for row in 0..m.height() {
                assert_near(rebuilt[(col, row)], m[(col, row)], tol, "UΣV^T");
            }
        }
    }

    #[test]
    fn pythag_matches_hypot() {
        assert_near(pythag(3.0, 4.0), 5.0, 1e-12, "3-4-5");
        assert_near(pythag(-3.0, 4.0), 5.0, 1e-12, "signs");
        assert_eq!(pythag(0.0, 0.0), 0.0);
        // Would overflow if squared naively.
        let big = 1e200;
        assert_near(pythag(big, big), big * core::f64::consts::SQRT_2, 1e186, "overflow-safe");
    }

    #[test]
    fn sign_transfer_convention() {
        assert_eq!(sign_transfer(3.0, -2.0), -3.0);
        assert_eq!(sign_transfer(-3.0, 2.0), 3.0);
        assert_eq!(sign_transfer(3.0, 0.0), 3.0);
    }

    #[test]
    fn svd_1x1() {
        let m = Matrix::from_flat(1, 1, &[-5.0], Layout::RowMajor).unwrap();
        let svd = m.svd().unwrap();
        assert_near(svd.sigma()[(0, 0)], 5.0, 1e-12, "σ");
        assert_reconstructs(&m, &svd, 1e-12);
    }

    #[test]
    fn svd_2x2_symmetric() {
        let m = Matrix::from_flat(2, 2, &[3.0, 2.0, 2.0, 3.0], Layout::RowMajor).unwrap();
        let svd = m.svd().unwrap();
        let values = singular_values(&svd);
        assert_near(values[0], 1.0, 1e-10, "σ_min");
        assert_near(values[1], 5.0, 1e-10, "σ_max");
        assert_reconstructs(&m, &svd, 1e-10);
    }

    #[test]
    fn svd_zero_iteration_budget_reports_failure() {
        let m = Matrix::from_flat(2, 2, &[3.0_f64, 2.0, 2.0, 3.0], Layout::RowMajor).unwrap();
        let err = m.svd_with(0).unwrap_err();
        assert_eq!(
            err,
            LinalgError::ConvergenceFailure {
                index: 1,
                iterations: 0
            }
        );
    }

    #[test]
    fn svd_diagonal_input() {
        let m = Matrix::from_flat(
            3,
            3,
            &[2.0, 0.0, 0.0, 0.0, -3.0, 0.0, 0.0, 0.0, 1.0],
            Layout::RowMajor,
        )
        .unwrap();
        let svd = m.svd().unwrap();
        let values = singular_values(&svd);
        assert_near(values[0], 1.0, 1e-10, "σ[min]");
        assert_near(values[1], 2.0, 1e-10, "σ[mid]");
        assert_near(values[2], 3.0, 1e-10, "σ[max]");
        assert_reconstructs(&m, &svd, 1e-10);
    }

    #[test]
    fn svd_tall() {
        let m = Matrix::from_flat(
            2,
            3,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            Layout::RowMajor,
        )
        .unwrap();
        let svd = m.svd().unwrap();
        assert_eq!(svd.u().width(), 2);
        assert_eq!(svd.u().height(), 3);
        assert_eq!(svd.sigma().width(), 2);
        assert_eq!(svd.v().width(), 2);
        assert_reconstructs(&m, &svd, 1e-9);
    }

    #[test]
    fn svd_values_non_negative_and_off_diagonal_zero() {
        let m = Matrix::from_flat(
            3,
            3,
            &[-4.0, 1.0, 2.0, 0.0, -3.0, 1.0, 2.0, 2.0, -5.0],
            Layout::RowMajor,
        )
        .unwrap();
        let svd = m.svd().unwrap();
        for i in 0..3 {
            assert!(svd.sigma()[(i, i)] >= 0.0);
            for j in 0..3 {
                if i != j {
                    assert_eq!(svd.sigma()[(i, j)], 0.0);
                }
            }
        }
        assert_reconstructs(&m, &svd, 1e-9);
    }

    #[test]
    fn svd_orthogonal_factors() {
        let m = Matrix::from_flat(
            3,
            3,
            &[4.0, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0],
            Layout::RowMajor,
        )
        .unwrap();
        let svd = m.svd().unwrap();
        let utu = &svd.u().transpose() * svd.u();
        let vvt = svd.v() * &svd.v().transpose();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(utu[(i, j)], expected, 1e-9, "U^TU");
                assert_near(vvt[(i, j)], expected, 1e-9, "VV^T");
            }
        }
    }

    #[test]
    fn svd_rejects_wide() {
        let m = Matrix::<f64>::zeros(3, 2).unwrap();
        assert_eq!(
            m.svd().unwrap_err(),
            LinalgError::MoreColumnsThanRows { columns: 3, rows: 2 }
        );
    }

    #[test]
    fn svd_zero_matrix() {
        let m = Matrix::<f64>::zeros(2, 2).unwrap();
        let svd = m.svd().unwrap();
        assert_eq!(svd.sigma()[(0, 0)], 0.0);
        assert_eq!(svd.sigma()[(1, 1)], 0.0);
        assert_reconstructs(&m, &svd, 1e-12);
    }
}
