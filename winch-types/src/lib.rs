//! Atomic types of the wicked winch protocol.
//!
//! Every multi-byte integer on the wire is little-endian and every float is
//! IEEE-754 binary32, small enough to decode on the device side without
//! buffering a whole message.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod canonical;
mod error;

pub use canonical::{Deserialize, Input, Output, Serialize, SizeCalculator};
pub use error::CodecError;

/// Byte selecting one device on the shared bus.
pub type TargetId = u8;

/// Monotonic device clock in ticks, wrapping modulo 2³².
pub type DeviceTime = u32;
