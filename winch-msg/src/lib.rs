//! Wire messages of the wicked winch protocol.
//!
//! A host addresses winch and lighting devices over a shared
//! bandwidth-limited bus. Every message is a fixed four-byte
//! [`MessageHeader`] followed by one typed payload record; path-carrying
//! commands embed the containers from [`winch_asm`]. Transport framing and
//! dispatch glue live with the bus driver, not here.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod config;
mod header;
mod message;
mod path_payload;
mod ping;
mod status;

pub use config::{DmxConfig, TargetList, WinchConfig};
pub use header::{MessageHeader, MessageType};
pub use message::{Message, Payload};
pub use path_payload::{DmxPath, WinchMode, WinchPath};
pub use ping::{PingRequest, PingResponse};
pub use status::{BmpStatus, WinchStatus, WinchStatusFlags};

#[doc(no_inline)]
pub use winch_types::{CodecError, Deserialize, Serialize, TargetId};
