use crate::traits::{Cell, Scalar};

use super::{Matrix, MatrixError};

impl<T: Scalar> Matrix<T> {
    /// Split the matrix into `block_size x block_size` blocks, yielding an
    /// outer matrix whose cells are the blocks.
    ///
    /// Both dimensions must divide evenly by `block_size` (which must be at
    /// least 1); otherwise an `UnevenBlocks` error is returned.
    ///
    /// ```
    /// use linmat::{Layout, Matrix};
    /// let m = Matrix::from_flat(4, 4, &(0..16).collect::<Vec<i64>>(), Layout::RowMajor).unwrap();
    /// let blocks = m.to_blocks(2).unwrap();
    /// assert_eq!(blocks.width(), 2);
    /// assert_eq!(blocks.height(), 2);
    /// assert_eq!(blocks[(1, 0)][(0, 1)], 6);
    /// ```
    pub fn to_blocks(&self, block_size: usize) -> Result<Matrix<Matrix<T>>, MatrixError> {
        if block_size < 1 || self.width % block_size != 0 || self.height % block_size != 0 {
            return Err(MatrixError::UnevenBlocks {
                block_size,
                width: self.width,
                height: self.height,
            });
        }
        let outer_w = self.width / block_size;
        let outer_h = self.height / block_size;
        let mut cells = alloc::vec::Vec::with_capacity(outer_w * outer_h);
        for bcol in 0..outer_w {
            for brow in 0..outer_h {
                let mut block = Matrix::raw_zeros(block_size, block_size);
                for col in 0..block_size {
                    for row in 0..block_size {
                        block[(col, row)] =
                            self[(bcol * block_size + col, brow * block_size + row)];
                    }
                }
                cells.push(block);
            }
        }
        Ok(Matrix::raw(outer_w, outer_h, cells))
    }
}

impl<T: Scalar + Cell> Matrix<T> {
    /// Product of two matrices computed block-by-block.
    ///
    /// Both operands are split with [`Matrix::to_blocks`] and multiplied
    /// through the generic product kernel, where each cell is a block and
    /// cell addition is block addition. The result equals the plain product
    /// exactly for integer cells.
    pub fn blockwise_multiply(
        &self,
        rhs: &Self,
        block_size: usize,
    ) -> Result<Self, MatrixError> {
        if self.width != rhs.height {
            return Err(MatrixError::ShapeMismatch {
                left: (self.width, self.height),
                right: (rhs.width, rhs.height),
            });
        }
        let lhs_blocks = self.to_blocks(block_size)?;
        let rhs_blocks = rhs.to_blocks(block_size)?;
        Ok(lhs_blocks.raw_mul(&rhs_blocks).flatten())
    }
}

impl<T: Scalar> Matrix<Matrix<T>> {
    /// Reassemble a matrix of uniform blocks into a flat matrix.
    ///
    /// Inverse of [`Matrix::to_blocks`].
    pub fn flatten(&self) -> Matrix<T> {
        let block_w = self[(0, 0)].width;
        let block_h = self[(0, 0)].height;
        let mut out = Matrix::raw_zeros(self.width * block_w, self.height * block_h);
        for bcol in 0..self.width {
            for brow in 0..self.height {
                let block = &self[(bcol, brow)];
                for col in 0..block_w {
                    for row in 0..block_h {
                        out[(bcol * block_w + col, brow * block_h + row)] = block[(col, row)];
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Layout;

    fn mat4(start: i64) -> Matrix<i64> {
        let cells: alloc::vec::Vec<i64> = (start..start + 16).collect();
        Matrix::from_flat(4, 4, &cells, Layout::RowMajor).unwrap()
    }

    #[test]
    fn to_blocks_and_back() {
        let m = mat4(0);
        let blocks = m.to_blocks(2).unwrap();
        assert_eq!(blocks.width(), 2);
        assert_eq!(blocks.height(), 2);
        // top-left block is rows 0..2, cols 0..2
        assert_eq!(blocks[(0, 0)][(0, 0)], 0);
        assert_eq!(blocks[(0, 0)][(1, 1)], 5);
        // bottom-right block
        assert_eq!(blocks[(1, 1)][(1, 1)], 15);
        assert_eq!(blocks.flatten(), m);
    }

    #[test]
    fn to_blocks_block_size_one() {
        let m = mat4(1);
        let blocks = m.to_blocks(1).unwrap();
        assert_eq!(blocks.width(), 4);
        assert_eq!(blocks[(2, 3)][(0, 0)], m[(2, 3)]);
        assert_eq!(blocks.flatten(), m);
    }

    #[test]
    fn to_blocks_uneven() {
        let m = mat4(0);
        assert_eq!(
            m.to_blocks(3).unwrap_err(),
            MatrixError::UnevenBlocks {
                block_size: 3,
                width: 4,
                height: 4
            }
        );
        assert!(m.to_blocks(0).is_err());
    }

    #[test]
    fn blockwise_matches_naive() {
        let a = mat4(1);
        let b = mat4(17);
        let plain = a.matrix_multiply(&b).unwrap();
        for bs in [1, 2, 4] {
            assert_eq!(a.blockwise_multiply(&b, bs).unwrap(), plain);
        }
    }

    #[test]
    fn blockwise_rectangular() {
        // 4x2 times 2x4 in block coordinates: (w x h) 2x4 * 4x2
        let a = Matrix::from_flat(2, 4, &[1, 2, 3, 4, 5, 6, 7, 8], Layout::RowMajor).unwrap();
        let b = Matrix::from_flat(4, 2, &[1, 0, 2, 0, 0, 1, 0, 2], Layout::RowMajor).unwrap();
        let plain = a.matrix_multiply(&b).unwrap();
        let blocked = a.blockwise_multiply(&b, 2).unwrap();
        assert_eq!(blocked, plain);
    }

    #[test]
    fn blockwise_shape_mismatch() {
        let a = Matrix::<i64>::zeros(4, 4).unwrap();
        let b = Matrix::<i64>::zeros(4, 2).unwrap();
        assert!(matches!(
            a.blockwise_multiply(&b, 2).unwrap_err(),
            MatrixError::ShapeMismatch { .. }
        ));
    }
}
