use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

use crate::matrix::Matrix;

/// Trait for plain numeric matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by operations that need `sqrt`, `abs`, comparisons against
/// machine epsilon, etc. (inversion, bidiagonalization, SVD, norms).
pub trait FloatScalar: Scalar + Float {}

impl<T: Scalar + Float> FloatScalar for T {}

/// Trait for cell types that flow through the multiply-accumulate kernel:
/// plain numbers and nested block matrices.
///
/// A `Matrix<T>` is a generic container; when its cells are themselves
/// matrices (blockwise multiplication), the product kernel needs an additive
/// identity shaped like an existing cell — a scalar zero carries no shape,
/// a zero block must match the block dimensions. `zero_like` provides that
/// seed; `cell_add` and `cell_mul` are the ring operations of the kernel.
pub trait Cell: Clone + PartialEq + Debug {
    /// Additive identity with the same shape as `self`.
    fn zero_like(&self) -> Self;

    /// Cell addition.
    fn cell_add(&self, rhs: &Self) -> Self;

    /// Cell multiplication.
    fn cell_mul(&self, rhs: &Self) -> Self;
}

/// Concrete impls for primitive numbers — trivial delegation.
macro_rules! impl_cell_scalar {
    ($($t:ty),*) => {
        $(
            impl Cell for $t {
                #[inline] fn zero_like(&self) -> $t { 0 as $t }
                #[inline] fn cell_add(&self, rhs: &$t) -> $t { self + rhs }
                #[inline] fn cell_mul(&self, rhs: &$t) -> $t { self * rhs }
            }
        )*
    };
}

impl_cell_scalar!(f32, f64, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl<T: Scalar + Cell> Cell for Matrix<T> {
    fn zero_like(&self) -> Self {
        Matrix::raw_zeros(self.width(), self.height())
    }

    fn cell_add(&self, rhs: &Self) -> Self {
        self.raw_add(rhs)
    }

    fn cell_mul(&self, rhs: &Self) -> Self {
        self.raw_mul(rhs)
    }
}
