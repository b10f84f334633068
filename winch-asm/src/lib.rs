//! Instruction-set primitives of the wicked winch protocol.
//!
//! A motion path is compiled into [`Expression`]s, piecewise-in-time
//! postfix programs carried by [`Path`] containers. This crate owns the
//! closed [`Operation`] set, the packed immediate encoding, the binary
//! codecs for expressions and paths, and the [`Builder`] that emits
//! well-formed expressions. Evaluation lives in `winch-vm`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod builder;
mod expression;
mod op;
pub mod pack;
mod path;

pub use builder::Builder;
pub use expression::Expression;
pub use op::{InvalidOperation, Operation};
pub use path::{Path, PathFlags, PathSegment};

#[doc(no_inline)]
pub use winch_types::{CodecError, Deserialize, Serialize};
