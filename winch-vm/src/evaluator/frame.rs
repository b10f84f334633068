use winch_asm::pack::unpack_count;

use crate::EvalError;

/// Cursor state of a single evaluation: the working stack, the two
/// immediate cursors and the borrowed scratch region.
pub(super) struct Frame<'a> {
    pub(super) stack: Vec<f64>,
    pub(super) ints: &'a [u8],
    pub(super) floats: &'a [f32],
    pub(super) scratch: &'a mut Vec<f64>,
}

impl Frame<'_> {
    /// Consume the next integer immediate.
    pub(super) fn pop_int(&mut self) -> Result<usize, EvalError> {
        let (&value, rest) = self
            .ints
            .split_first()
            .ok_or(EvalError::IntLiteralsUnderflow)?;
        self.ints = rest;
        Ok(value as usize)
    }

    /// Consume a packed count immediate and perform its implicit push.
    ///
    /// The low `bits` of the byte carry the number of operand slots to load
    /// from the literal stream; each slot is `size · multiplier` floats.
    pub(super) fn packed_count(
        &mut self,
        bits: u32,
        multiplier: usize,
    ) -> Result<usize, EvalError> {
        let byte = self.pop_int()?;
        let (size, pushes) = unpack_count(byte as u8, bits);
        if pushes > 0 {
            self.push_literals(pushes * size * multiplier)?;
        }
        Ok(size)
    }

    /// Move `n` values from the literal stream onto the stack.
    pub(super) fn push_literals(&mut self, n: usize) -> Result<(), EvalError> {
        if self.floats.len() < n {
            return Err(EvalError::FloatLiteralsUnderflow);
        }
        let (head, rest) = self.floats.split_at(n);
        self.floats = rest;
        self.stack.extend(head.iter().map(|&v| f64::from(v)));
        Ok(())
    }

    /// Fail with [`EvalError::StackUnderflow`] unless `n` values are present.
    pub(super) fn need(&self, n: usize) -> Result<(), EvalError> {
        if self.stack.len() < n {
            return Err(EvalError::StackUnderflow);
        }
        Ok(())
    }

    pub(super) fn pop(&mut self) -> Result<f64, EvalError> {
        self.stack.pop().ok_or(EvalError::StackUnderflow)
    }

    /// Move the top `n` values into the scratch region, deepest first.
    pub(super) fn take_into_scratch(&mut self, n: usize) -> Result<(), EvalError> {
        self.need(n)?;
        let at = self.stack.len() - n;
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.stack[at..]);
        self.stack.truncate(at);
        Ok(())
    }
}
