//! Static stack-growth bounding.

use winch_asm::pack::{unpack_count, PUSH_BITS_1, PUSH_BITS_2};
use winch_asm::{Expression, Operation};

/// Conservative upper bound on how many values `expr` can add to a working
/// stack, derived from the declared immediate counts alone.
///
/// Counts every push an operation can perform and ignores discards, so the
/// true high-water mark never exceeds `initial depth + bound`. Callers
/// pre-size their stacks with it, or reject expressions whose bound
/// exceeds a configured ceiling before evaluating.
///
/// Returns `None` when the opcode or immediate stream is malformed; such
/// expressions fail evaluation anyway.
pub fn stack_growth_bound(expr: &Expression) -> Option<usize> {
    let mut ints = expr.ints().iter();
    let mut next_int = || ints.next().map(|&b| b as usize);
    let mut bound = 0usize;

    for &byte in expr.ops() {
        let op = Operation::try_from(byte).ok()?;
        let growth = match op {
            Operation::Undefined => return None,
            Operation::Push => next_int()?,
            Operation::Pop | Operation::RotL | Operation::RotR | Operation::Rev => {
                next_int()?;
                0
            }
            Operation::Dup => {
                next_int()?;
                1
            }
            Operation::Transpose => {
                next_int()?;
                next_int()?;
                0
            }
            Operation::Add
            | Operation::Sub
            | Operation::Mul
            | Operation::MulAdd
            | Operation::Div
            | Operation::Mod
            | Operation::Neg
            | Operation::Abs
            | Operation::Inv
            | Operation::Pow
            | Operation::Sqrt
            | Operation::Exp
            | Operation::Ln
            | Operation::Sin
            | Operation::Cos
            | Operation::Tan
            | Operation::Asin
            | Operation::Acos
            | Operation::Atan2 => 0,
            Operation::AddVec
            | Operation::SubVec
            | Operation::MulVec
            | Operation::ScaleVec
            | Operation::NegVec => {
                let (size, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_1);
                pushes * size
            }
            Operation::NormVec => {
                let (size, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_1);
                pushes * size + 1
            }
            Operation::PolyVec => {
                let (size, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_1);
                pushes * size + 1
            }
            Operation::MulAddVec => {
                let (size, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_2);
                pushes * size
            }
            Operation::Lerp => {
                let (size, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_2);
                pushes * size + size
            }
            Operation::MulMat => {
                let arows = next_int()?;
                let brows = next_int()?;
                let (bcols, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_1);
                pushes * bcols * brows + arows * bcols
            }
            Operation::PolyMat => {
                let rows = next_int()?;
                let (cols, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_1);
                pushes * cols * rows + cols
            }
            Operation::Lut => {
                let rows = next_int()?;
                let (cols, pushes) = unpack_count(next_int()? as u8, PUSH_BITS_1);
                pushes * cols * rows + cols
            }
        };
        bound = bound.checked_add(growth)?;
    }
    Some(bound)
}
