//! Scalar arithmetic.

use super::Frame;
use crate::EvalError;

impl Frame<'_> {
    pub(super) fn unary(&mut self, f: impl FnOnce(f64) -> f64) -> Result<(), EvalError> {
        let operand = self.pop()?;
        self.stack.push(f(operand));
        Ok(())
    }

    /// Apply `f(lhs, rhs)` where `rhs` is the top of the stack.
    pub(super) fn binary(&mut self, f: impl FnOnce(f64, f64) -> f64) -> Result<(), EvalError> {
        self.need(2)?;
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        self.stack.push(f(lhs, rhs));
        Ok(())
    }

    pub(super) fn op_mul_add(&mut self) -> Result<(), EvalError> {
        self.need(3)?;
        let c = self.pop()?;
        let b = self.pop()?;
        let a = self.pop()?;
        // Not f64::mul_add: the result is rounded twice on the wire peers.
        self.stack.push(a * b + c);
        Ok(())
    }
}
