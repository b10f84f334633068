//! Vector operations.

use itertools::izip;
use winch_asm::pack::{PUSH_BITS_1, PUSH_BITS_2};

use super::Frame;
use crate::EvalError;

impl Frame<'_> {
    /// Elementwise binary operation over two vectors, rhs on top.
    pub(super) fn elementwise(&mut self, f: impl Fn(f64, f64) -> f64) -> Result<(), EvalError> {
        let size = self.packed_count(PUSH_BITS_1, 1)?;
        self.need(size * 2)?;
        let at = self.stack.len() - size * 2;
        let (lhs, rhs) = self.stack[at..].split_at_mut(size);
        for (l, r) in lhs.iter_mut().zip(rhs.iter()) {
            *l = f(*l, *r);
        }
        self.stack.truncate(at + size);
        Ok(())
    }

    pub(super) fn op_mul_add_vec(&mut self) -> Result<(), EvalError> {
        let size = self.packed_count(PUSH_BITS_2, 1)?;
        self.need(size * 3)?;
        let at = self.stack.len() - size * 3;
        let (ab, c) = self.stack[at..].split_at_mut(size * 2);
        let (a, b) = ab.split_at_mut(size);
        for (a, b, c) in izip!(a.iter_mut(), b.iter(), c.iter()) {
            *a = *a * *b + *c;
        }
        self.stack.truncate(at + size);
        Ok(())
    }

    pub(super) fn op_scale_vec(&mut self) -> Result<(), EvalError> {
        let size = self.packed_count(PUSH_BITS_1, 1)?;
        self.need(size + 1)?;
        // The scalar sits beneath the vector; results shift down one slot.
        let base = self.stack.len() - size - 1;
        let scalar = self.stack[base];
        for i in 0..size {
            self.stack[base + i] = scalar * self.stack[base + 1 + i];
        }
        self.stack.truncate(base + size);
        Ok(())
    }

    pub(super) fn op_neg_vec(&mut self) -> Result<(), EvalError> {
        let size = self.packed_count(PUSH_BITS_1, 1)?;
        self.need(size)?;
        let at = self.stack.len() - size;
        for value in &mut self.stack[at..] {
            *value = -*value;
        }
        Ok(())
    }

    pub(super) fn op_norm_vec(&mut self) -> Result<(), EvalError> {
        let size = self.packed_count(PUSH_BITS_1, 1)?;
        self.need(size)?;
        let at = self.stack.len() - size;
        let sum: f64 = self.stack[at..].iter().map(|v| v * v).sum();
        self.stack.truncate(at);
        self.stack.push(sum.sqrt());
        Ok(())
    }

    pub(super) fn op_poly_vec(&mut self) -> Result<(), EvalError> {
        let size = self.packed_count(PUSH_BITS_1, 1)?;
        self.need(size + 1)?;
        self.take_into_scratch(size)?;
        let param = self.pop()?;
        let mut power = 1.0;
        let mut result = 0.0;
        // Coefficient order is c₀ deepest; powers ascend with depth order.
        for &coeff in self.scratch.iter() {
            result += coeff * power;
            power *= param;
        }
        self.stack.push(result);
        Ok(())
    }

    pub(super) fn op_lerp(&mut self) -> Result<(), EvalError> {
        let size = self.packed_count(PUSH_BITS_2, 1)?;
        self.need(size * 2 + 1)?;
        self.take_into_scratch(size * 2)?;
        let t = self.pop()?;
        let (v0, v1) = self.scratch.split_at(size);
        for (a, b) in v0.iter().zip(v1.iter()) {
            self.stack.push((1.0 - t) * a + t * b);
        }
        Ok(())
    }
}
