//! Matrix-shaped operations backed by the scratch region.

use winch_asm::pack::PUSH_BITS_1;

use super::Frame;
use crate::EvalError;

impl Frame<'_> {
    pub(super) fn op_mul_mat(&mut self) -> Result<(), EvalError> {
        let arows = self.pop_int()?;
        let brows = self.pop_int()?;
        // The implicit push loads the whole B matrix: brows floats per
        // column slot.
        let bcols = self.packed_count(PUSH_BITS_1, brows)?;
        let asize = arows * brows;
        let bsize = brows * bcols;
        self.need(asize + bsize)?;
        self.take_into_scratch(asize + bsize)?;
        let (a, b) = self.scratch.split_at(asize);
        for i in 0..arows {
            for j in 0..bcols {
                let mut acc = 0.0;
                for k in 0..brows {
                    acc += a[brows * i + k] * b[bcols * k + j];
                }
                self.stack.push(acc);
            }
        }
        Ok(())
    }

    pub(super) fn op_poly_mat(&mut self) -> Result<(), EvalError> {
        let rows = self.pop_int()?;
        let cols = self.packed_count(PUSH_BITS_1, rows)?;
        let coeffs = rows * cols;
        self.need(coeffs + 1)?;
        self.take_into_scratch(coeffs)?;
        let param = self.pop()?;
        // result[j] = Σᵢ coeff[i·cols + j] · paramⁱ
        for j in 0..cols {
            let mut power = 1.0;
            let mut acc = 0.0;
            for i in 0..rows {
                acc += self.scratch[cols * i + j] * power;
                power *= param;
            }
            self.stack.push(acc);
        }
        Ok(())
    }

    pub(super) fn op_lut(&mut self) -> Result<(), EvalError> {
        let rows = self.pop_int()?;
        let cols = self.packed_count(PUSH_BITS_1, rows)?;
        let size = rows * cols;
        self.need(size + 1)?;
        self.take_into_scratch(size)?;
        let t = self.pop()?;
        if rows == 0 || cols == 0 {
            // Degenerate tables produce no output.
            return Ok(());
        }

        let ub = upper_bound(self.scratch, rows, cols, t);
        if ub == 0 {
            let row = &self.scratch[1..cols];
            self.stack.extend_from_slice(row);
        } else if ub == rows {
            let row = &self.scratch[size - cols + 1..];
            self.stack.extend_from_slice(row);
        } else {
            let t0 = self.scratch[(ub - 1) * cols];
            let t1 = self.scratch[ub * cols];
            let u = (t - t0) / (t1 - t0);
            let v0 = &self.scratch[(ub - 1) * cols + 1..ub * cols];
            let v1 = &self.scratch[ub * cols + 1..(ub + 1) * cols];
            for (a, b) in v0.iter().zip(v1.iter()) {
                self.stack.push((1.0 - u) * a + u * b);
            }
        }
        Ok(())
    }
}

/// Smallest row index whose key (column 0) exceeds `t`; `rows` when none
/// does. Comparing with `t < key` keeps NaN parameters on the last row.
fn upper_bound(lut: &[f64], rows: usize, cols: usize, t: f64) -> usize {
    let (mut lo, mut hi) = (0, rows);
    while lo < hi {
        let mid = (lo + hi) / 2;
        if t < lut[mid * cols] {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
