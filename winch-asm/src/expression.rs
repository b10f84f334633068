use core::fmt;

use winch_types::{CodecError, Deserialize, Input, Output, Serialize};

use crate::Operation;

/// A compiled postfix program.
///
/// Three parallel streams: opcodes, integer immediates and float literals.
/// Opcodes consume immediates and literals from the fronts of their streams
/// in program order. An expression is immutable once built; construct one
/// with [`crate::Builder`] or decode it from the wire.
///
/// The opcode stream is kept as raw bytes so a decoded expression
/// re-encodes exactly even when it carries codes this build does not know;
/// mapping to [`Operation`] happens at evaluation time.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    ops: Vec<u8>,
    ints: Vec<u8>,
    floats: Vec<f32>,
}

impl Expression {
    /// Assemble an expression from raw streams.
    ///
    /// No validation is performed; the evaluator reports malformed programs
    /// when they run. Prefer [`crate::Builder`] for well-formed programs.
    pub fn new(ops: Vec<u8>, ints: Vec<u8>, floats: Vec<f32>) -> Self {
        Self { ops, ints, floats }
    }

    /// The opcode stream.
    pub fn ops(&self) -> &[u8] {
        &self.ops
    }

    /// The integer-immediate stream.
    pub fn ints(&self) -> &[u8] {
        &self.ints
    }

    /// The float-literal stream.
    pub fn floats(&self) -> &[f32] {
        &self.floats
    }

    /// True when the program contains no opcodes.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Concatenate expressions stream-wise, in order.
    pub fn join<'a, I>(exprs: I) -> Self
    where
        I: IntoIterator<Item = &'a Expression>,
    {
        let mut result = Self::default();
        for expr in exprs {
            result.ops.extend_from_slice(&expr.ops);
            result.ints.extend_from_slice(&expr.ints);
            result.floats.extend_from_slice(&expr.floats);
        }
        result
    }
}

/// Padding between the integer-immediate and float-literal blocks.
///
/// Always 1..=4 zero bytes: the legacy peers write `4 - ((op + i) % 4)`,
/// which over-aligns by a full word when the streams already end on a
/// 4-byte boundary. Kept bit-for-bit for compatibility with deployed
/// devices.
const fn pad_len(op_size: usize, i_size: usize) -> usize {
    4 - (op_size + i_size) % 4
}

impl Serialize for Expression {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        let op_size = u8::try_from(self.ops.len()).map_err(|_| CodecError::LengthOverflow)?;
        let i_size = u8::try_from(self.ints.len()).map_err(|_| CodecError::LengthOverflow)?;
        let f_size = u16::try_from(self.floats.len()).map_err(|_| CodecError::LengthOverflow)?;

        op_size.encode(buffer)?;
        i_size.encode(buffer)?;
        f_size.encode(buffer)?;
        buffer.write(&self.ops)?;
        buffer.write(&self.ints)?;
        buffer.write(&[0u8; 4][..pad_len(self.ops.len(), self.ints.len())])?;
        for literal in &self.floats {
            literal.encode(buffer)?;
        }
        Ok(())
    }
}

impl Deserialize for Expression {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        let op_size = u8::decode(buffer)? as usize;
        let i_size = u8::decode(buffer)? as usize;
        let f_size = u16::decode(buffer)? as usize;

        let mut ops = vec![0u8; op_size];
        buffer.read(&mut ops)?;
        let mut ints = vec![0u8; i_size];
        buffer.read(&mut ints)?;
        buffer.skip(pad_len(op_size, i_size))?;
        let mut floats = Vec::with_capacity(f_size);
        for _ in 0..f_size {
            floats.push(f32::decode(buffer)?);
        }
        Ok(Self { ops, ints, floats })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut sep = "";
        for &byte in &self.ops {
            match Operation::try_from(byte) {
                Ok(op) => write!(f, "{sep}op:{op}")?,
                Err(_) => write!(f, "{sep}op:unknown[{byte}]")?,
            }
            sep = " ";
        }
        for value in &self.ints {
            write!(f, "{sep}i:{value}")?;
            sep = " ";
        }
        for value in &self.floats {
            write!(f, "{sep}f:{value}")?;
            sep = " ";
        }
        write!(f, "}}")
    }
}
