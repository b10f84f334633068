use winch_types::{CodecError, Deserialize, Input, Output, Serialize, TargetId};

/// Payload type tag carried in every message header.
///
/// The tag determines the payload record that follows the header; request
/// tags without a listed payload carry zero payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageType {
    /// No payload.
    None = 0,
    /// Payload: [`crate::PingRequest`].
    PingRequest = 1,
    /// Payload: [`crate::PingResponse`].
    PingResponse = 2,
    /// Payload: [`crate::BmpStatus`].
    NotifyBmpStatus = 3,
    /// Payload: [`crate::WinchStatus`].
    NotifyWinchStatus = 4,
    /// Payload: none.
    GetWinchTargetsRequest = 5,
    /// Payload: [`crate::TargetList`].
    GetWinchTargetsResponse = 6,
    /// Payload: none.
    GetWinchConfigRequest = 7,
    /// Payload: [`crate::WinchConfig`].
    GetWinchConfigResponse = 8,
    /// Payload: [`crate::WinchConfig`].
    SetWinchConfig = 9,
    /// Payload: [`crate::WinchPath`].
    SetWinchPath = 10,
    /// Payload: none.
    GetDmxTargetsRequest = 11,
    /// Payload: [`crate::TargetList`].
    GetDmxTargetsResponse = 12,
    /// Payload: none.
    GetDmxConfigRequest = 13,
    /// Payload: [`crate::DmxConfig`].
    GetDmxConfigResponse = 14,
    /// Payload: [`crate::DmxConfig`].
    SetDmxConfig = 15,
    /// Payload: [`crate::DmxPath`].
    SetDmxPath = 16,
}

impl From<MessageType> for u8 {
    fn from(ty: MessageType) -> u8 {
        ty as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = CodecError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        use MessageType::*;
        Ok(match b {
            0 => None,
            1 => PingRequest,
            2 => PingResponse,
            3 => NotifyBmpStatus,
            4 => NotifyWinchStatus,
            5 => GetWinchTargetsRequest,
            6 => GetWinchTargetsResponse,
            7 => GetWinchConfigRequest,
            8 => GetWinchConfigResponse,
            9 => SetWinchConfig,
            10 => SetWinchPath,
            11 => GetDmxTargetsRequest,
            12 => GetDmxTargetsResponse,
            13 => GetDmxConfigRequest,
            14 => GetDmxConfigResponse,
            15 => SetDmxConfig,
            16 => SetDmxPath,
            _ => return Err(CodecError::UnknownPayloadType(b)),
        })
    }
}

/// Fixed four-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageHeader {
    /// Device the message addresses, or the sender for notifications.
    pub target_id: TargetId,
    /// Tag selecting the payload record.
    pub message_type: MessageType,
    /// Byte length of the payload that follows.
    pub payload_size: u16,
}

impl MessageHeader {
    /// Encoded size of a header in bytes.
    pub const LEN: usize = 4;
}

impl Serialize for MessageHeader {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        self.target_id.encode(buffer)?;
        u8::from(self.message_type).encode(buffer)?;
        self.payload_size.encode(buffer)
    }
}

impl Deserialize for MessageHeader {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        let target_id = u8::decode(buffer)?;
        let message_type = MessageType::try_from(u8::decode(buffer)?)?;
        let payload_size = u16::decode(buffer)?;
        Ok(Self {
            target_id,
            message_type,
            payload_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn tags_round_trip() {
        for ty in MessageType::iter() {
            assert_eq!(MessageType::try_from(u8::from(ty)), Ok(ty));
        }
        assert_eq!(
            MessageType::try_from(17),
            Err(CodecError::UnknownPayloadType(17))
        );
    }

    #[test]
    fn header_is_four_bytes() {
        let header = MessageHeader {
            target_id: 1,
            message_type: MessageType::NotifyBmpStatus,
            payload_size: 12,
        };
        let bytes = header.to_bytes().unwrap();
        assert_eq!(bytes.len(), MessageHeader::LEN);
        assert_eq!(bytes, vec![1, 3, 12, 0]);
        assert_eq!(MessageHeader::from_bytes(&bytes).unwrap(), header);
    }
}
