//! Postfix expression virtual machine of the wicked winch protocol.
//!
//! Devices evaluate the active [`winch_asm::PathSegment`]'s expression at
//! their own clock to produce position, velocity or DMX channel outputs.
//! The machine is a pure function over a caller-supplied working stack of
//! doubles; expressions are immutable, so distinct evaluations never
//! interact and need no locking.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod bound;
mod error;
mod evaluator;
mod schedule;

pub use bound::stack_growth_bound;
pub use error::EvalError;
pub use evaluator::{eval, Evaluator};
pub use schedule::{active_segment, DEFAULT_HORIZON};
