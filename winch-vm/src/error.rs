use thiserror::Error;

/// Evaluation failures.
///
/// The first error encountered aborts the evaluation and the partially
/// mutated working stack is discarded. Evaluation errors are distinct from
/// [`winch_types::CodecError`]; neither converts into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Opcode zero or a code outside the defined set was executed.
    #[error("undefined operation")]
    UndefinedOperation,
    /// The working stack held fewer values than the operation consumes.
    #[error("stack underflow")]
    StackUnderflow,
    /// The integer-immediate stream was exhausted.
    #[error("ints underflow")]
    IntLiteralsUnderflow,
    /// The float-literal stream was exhausted during a push.
    #[error("floats underflow")]
    FloatLiteralsUnderflow,
}
