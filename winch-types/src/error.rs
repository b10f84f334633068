use thiserror::Error;

/// Errors produced while encoding or decoding wire containers.
///
/// Codec failures are distinct from evaluation failures; the two never
/// convert into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input ended before the record was complete.
    #[error("buffer is too short")]
    BufferTooShort,
    /// A sequence is longer than its wire length field can express.
    #[error("sequence length exceeds the wire format field")]
    LengthOverflow,
    /// A path segment offset points before the segment table.
    #[error("segment offset out of range: {0}")]
    SegmentOffsetOutOfRange(u16),
    /// A path segment extends past the end of the payload block.
    #[error("segment end out of range: {0}")]
    SegmentEndOutOfRange(u32),
    /// The message header carries a payload type tag outside the known set.
    #[error("unknown payload type: {0}")]
    UnknownPayloadType(u8),
    /// A closed-set field carries a discriminant outside the known set.
    #[error("unknown discriminant: {0}")]
    UnknownDiscriminant(u8),
    /// The payload did not occupy exactly the byte count the header declared.
    #[error("payload size mismatch: header declares {header}, payload occupies {payload}")]
    PayloadSizeMismatch {
        /// Size declared by the message header.
        header: u16,
        /// Bytes the payload actually occupied.
        payload: usize,
    },
}
