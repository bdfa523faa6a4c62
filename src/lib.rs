//! # linmat
//!
//! Dense matrix and vector algebra with runtime dimensions, no-std
//! compatible. Covers construction and arithmetic, Gauss-Jordan inversion,
//! Householder bidiagonalization, singular value decomposition, the
//! Moore-Penrose pseudoinverse, and blockwise multiplication.
//!
//! ## Quick start
//!
//! ```
//! use linmat::{Layout, Matrix};
//!
//! let m = Matrix::from_flat(2, 2, &[1.0_f64, 2.0, 3.0, 4.0], Layout::RowMajor).unwrap();
//! let inv = m.invert().unwrap();
//! let product = &m * &inv;
//! assert!((product[(0, 0)] - 1.0).abs() < 1e-12);
//! assert!(product[(1, 0)].abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated [`Matrix<T>`] with runtime dimensions.
//!   Column-major `Vec<T>` storage, cells addressed by `(column, row)`.
//!   Fallible constructors and accessors return [`MatrixError`]; operator
//!   overloads (`+`, `-`, `*`, `/`) are the ergonomic layer and panic on
//!   shape mismatch. Includes the block machinery for
//!   [`Matrix::blockwise_multiply`] and the [`Vector<T>`] newtype.
//!
//! - [`linalg`] — Gauss-Jordan reduction and inversion, Householder
//!   bidiagonalization, implicit-shift-QR SVD, and the pseudoinverse.
//!   Everything fallible returns [`linalg::LinalgError`]; failed
//!   operations leave the receiver untouched.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by the decompositions
//!   - [`Cell`] — multiply-accumulate cells: plain numbers or nested block matrices
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via the system libm |
//! | `libm`  | no      | Pure-Rust software float fallback for no-std targets |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::{Bidiagonal, LinalgError, Svd};
pub use matrix::{Layout, Matrix, MatrixError, MulBackend, Vector};
pub use traits::{Cell, FloatScalar, Scalar};
