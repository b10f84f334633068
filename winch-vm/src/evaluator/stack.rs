//! Stack-shuffling operations.

use super::Frame;
use crate::EvalError;

impl Frame<'_> {
    pub(super) fn op_push(&mut self) -> Result<(), EvalError> {
        let n = self.pop_int()?;
        self.push_literals(n)
    }

    pub(super) fn op_pop(&mut self) -> Result<(), EvalError> {
        let n = self.pop_int()?;
        self.need(n)?;
        let at = self.stack.len() - n;
        self.stack.truncate(at);
        Ok(())
    }

    pub(super) fn op_dup(&mut self) -> Result<(), EvalError> {
        let n = self.pop_int()?;
        self.need(n + 1)?;
        let value = self.stack[self.stack.len() - n - 1];
        self.stack.push(value);
        Ok(())
    }

    // Rotations of one value or none touch nothing, not even the stack
    // depth check.
    pub(super) fn op_rot_l(&mut self) -> Result<(), EvalError> {
        let n = self.pop_int()?;
        if n > 1 {
            self.need(n)?;
            let at = self.stack.len() - n;
            self.stack[at..].rotate_left(1);
        }
        Ok(())
    }

    pub(super) fn op_rot_r(&mut self) -> Result<(), EvalError> {
        let n = self.pop_int()?;
        if n > 1 {
            self.need(n)?;
            let at = self.stack.len() - n;
            self.stack[at..].rotate_right(1);
        }
        Ok(())
    }

    pub(super) fn op_rev(&mut self) -> Result<(), EvalError> {
        let n = self.pop_int()?;
        self.need(n)?;
        let at = self.stack.len() - n;
        self.stack[at..].reverse();
        Ok(())
    }

    pub(super) fn op_transpose(&mut self) -> Result<(), EvalError> {
        let rows = self.pop_int()?;
        let cols = self.pop_int()?;
        let size = rows * cols;
        self.take_into_scratch(size)?;
        // Element k of the c×r result reads row-major element (k % r, k / r)
        // of the source.
        for k in 0..size {
            let i = k % rows;
            let j = k / rows;
            self.stack.push(self.scratch[cols * i + j]);
        }
        Ok(())
    }
}
