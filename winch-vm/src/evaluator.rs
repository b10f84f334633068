//! The evaluation loop.

use tracing::trace;
use winch_asm::{Expression, Operation};

use crate::EvalError;

mod arith;
mod frame;
mod matrix;
mod stack;
mod vector;

use frame::Frame;

/// The postfix virtual machine.
///
/// Stateless between evaluations apart from a reusable scratch buffer
/// backing the matrix-shaped operations, so repeated evaluation on a device
/// allocates nothing once the buffers are warm. One evaluator per worker;
/// distinct evaluators never interact.
#[derive(Debug, Default)]
pub struct Evaluator {
    scratch: Vec<f64>,
}

impl Evaluator {
    /// Create an evaluator with an empty scratch region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `expr` against the working stack.
    ///
    /// Consumes the stack and returns the resulting one; when evaluation
    /// fails the partially mutated stack is discarded and only the error
    /// remains.
    pub fn eval(&mut self, expr: &Expression, stack: Vec<f64>) -> Result<Vec<f64>, EvalError> {
        trace!(
            ops = expr.ops().len(),
            depth = stack.len(),
            "evaluating expression"
        );
        let mut frame = Frame {
            stack,
            ints: expr.ints(),
            floats: expr.floats(),
            scratch: &mut self.scratch,
        };
        for &byte in expr.ops() {
            let op = Operation::try_from(byte).map_err(|_| EvalError::UndefinedOperation)?;
            match op {
                Operation::Undefined => return Err(EvalError::UndefinedOperation),
                Operation::Push => frame.op_push()?,
                Operation::Pop => frame.op_pop()?,
                Operation::Dup => frame.op_dup()?,
                Operation::RotL => frame.op_rot_l()?,
                Operation::RotR => frame.op_rot_r()?,
                Operation::Rev => frame.op_rev()?,
                Operation::Transpose => frame.op_transpose()?,
                Operation::Add => frame.binary(|lhs, rhs| lhs + rhs)?,
                Operation::Sub => frame.binary(|lhs, rhs| lhs - rhs)?,
                Operation::Mul => frame.binary(|lhs, rhs| lhs * rhs)?,
                Operation::MulAdd => frame.op_mul_add()?,
                Operation::Div => frame.binary(|lhs, rhs| lhs / rhs)?,
                Operation::Mod => frame.binary(libm::remainder)?,
                Operation::Neg => frame.unary(|x| -x)?,
                Operation::Abs => frame.unary(f64::abs)?,
                Operation::Inv => frame.unary(|x| 1.0 / x)?,
                Operation::Pow => frame.binary(f64::powf)?,
                Operation::Sqrt => frame.unary(f64::sqrt)?,
                Operation::Exp => frame.unary(f64::exp)?,
                Operation::Ln => frame.unary(f64::ln)?,
                Operation::Sin => frame.unary(f64::sin)?,
                Operation::Cos => frame.unary(f64::cos)?,
                Operation::Tan => frame.unary(f64::tan)?,
                Operation::Asin => frame.unary(f64::asin)?,
                Operation::Acos => frame.unary(f64::acos)?,
                Operation::Atan2 => frame.binary(f64::atan2)?,
                Operation::AddVec => frame.elementwise(|lhs, rhs| lhs + rhs)?,
                Operation::SubVec => frame.elementwise(|lhs, rhs| lhs - rhs)?,
                Operation::MulVec => frame.elementwise(|lhs, rhs| lhs * rhs)?,
                Operation::MulAddVec => frame.op_mul_add_vec()?,
                Operation::ScaleVec => frame.op_scale_vec()?,
                Operation::NegVec => frame.op_neg_vec()?,
                Operation::NormVec => frame.op_norm_vec()?,
                Operation::MulMat => frame.op_mul_mat()?,
                Operation::PolyVec => frame.op_poly_vec()?,
                Operation::PolyMat => frame.op_poly_mat()?,
                Operation::Lerp => frame.op_lerp()?,
                Operation::Lut => frame.op_lut()?,
            }
        }
        Ok(frame.stack)
    }
}

/// Evaluate with a throwaway [`Evaluator`].
pub fn eval(expr: &Expression, stack: Vec<f64>) -> Result<Vec<f64>, EvalError> {
    Evaluator::new().eval(expr, stack)
}
