use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use super::Matrix;

// ── Row manipulation ────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let mut m = Matrix::from_flat(2, 2, &[1.0, 2.0, 3.0, 4.0], Layout::RowMajor).unwrap();
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(0, 1)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let h = self.height;
            for col in 0..self.width {
                self.data.swap(col * h + a, col * h + b);
            }
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> Matrix<T> {
    /// Render with every cell shown at a fixed number of fraction digits,
    /// right-aligned within its column.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_flat(2, 1, &[1.5, -2.25], Layout::RowMajor).unwrap();
    /// assert_eq!(m.to_string_precision(2), "│1.50  -2.25│");
    /// ```
    pub fn to_string_precision(&self, precision: usize) -> String {
        let mut out = String::new();
        // Infallible: fmt::Write to a String never errors.
        let _ = self.write_with_precision(&mut out, precision);
        out
    }

    fn write_with_precision(&self, f: &mut impl fmt::Write, precision: usize) -> fmt::Result {
        let mut widths: Vec<usize> = alloc::vec![0; self.width];
        for (col, width) in widths.iter_mut().enumerate() {
            for row in 0..self.height {
                let w = WriteCounting::count(|wc| {
                    write!(wc, "{:.*}", precision, self[(col, row)])
                });
                if w > *width {
                    *width = w;
                }
            }
        }

        for row in 0..self.height {
            write!(f, "│")?;
            for col in 0..self.width {
                if col > 0 {
                    write!(f, "  ")?;
                }
                write!(
                    f,
                    "{:>width$.precision$}",
                    self[(col, row)],
                    width = widths[col],
                    precision = precision,
                )?;
            }
            write!(f, "│")?;
            if row < self.height - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// `Display` shows three fraction digits; use
/// [`Matrix::to_string_precision`] for other widths.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with_precision(f, 3)
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.len();
        Ok(())
    }
}
