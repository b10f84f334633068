use tracing::debug;
use winch_types::{CodecError, Deserialize, Input, Output, Serialize, TargetId};

use crate::{
    BmpStatus, DmxConfig, DmxPath, MessageHeader, MessageType, PingRequest, PingResponse,
    TargetList, WinchConfig, WinchPath, WinchStatus,
};

/// The typed payload of a message, one variant per [`MessageType`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// No payload.
    None,
    /// Host liveness probe.
    PingRequest(PingRequest),
    /// Device answer to a probe.
    PingResponse(PingResponse),
    /// Pressure/temperature notification.
    NotifyBmpStatus(BmpStatus),
    /// Winch state notification.
    NotifyWinchStatus(WinchStatus),
    /// Enumerate winch devices.
    GetWinchTargetsRequest,
    /// Winch devices present on the bus.
    GetWinchTargetsResponse(TargetList),
    /// Read a winch's configuration.
    GetWinchConfigRequest,
    /// A winch's current configuration.
    GetWinchConfigResponse(WinchConfig),
    /// Replace a winch's configuration.
    SetWinchConfig(WinchConfig),
    /// Replace a winch's motion path.
    SetWinchPath(WinchPath),
    /// Enumerate lighting devices.
    GetDmxTargetsRequest,
    /// Lighting devices present on the bus.
    GetDmxTargetsResponse(TargetList),
    /// Read a lighting device's configuration.
    GetDmxConfigRequest,
    /// A lighting device's current configuration.
    GetDmxConfigResponse(DmxConfig),
    /// Replace a lighting device's configuration.
    SetDmxConfig(DmxConfig),
    /// Replace a lighting device's channel-value path.
    SetDmxPath(DmxPath),
}

impl Payload {
    /// The header tag for this payload.
    pub fn message_type(&self) -> MessageType {
        match self {
            Payload::None => MessageType::None,
            Payload::PingRequest(_) => MessageType::PingRequest,
            Payload::PingResponse(_) => MessageType::PingResponse,
            Payload::NotifyBmpStatus(_) => MessageType::NotifyBmpStatus,
            Payload::NotifyWinchStatus(_) => MessageType::NotifyWinchStatus,
            Payload::GetWinchTargetsRequest => MessageType::GetWinchTargetsRequest,
            Payload::GetWinchTargetsResponse(_) => MessageType::GetWinchTargetsResponse,
            Payload::GetWinchConfigRequest => MessageType::GetWinchConfigRequest,
            Payload::GetWinchConfigResponse(_) => MessageType::GetWinchConfigResponse,
            Payload::SetWinchConfig(_) => MessageType::SetWinchConfig,
            Payload::SetWinchPath(_) => MessageType::SetWinchPath,
            Payload::GetDmxTargetsRequest => MessageType::GetDmxTargetsRequest,
            Payload::GetDmxTargetsResponse(_) => MessageType::GetDmxTargetsResponse,
            Payload::GetDmxConfigRequest => MessageType::GetDmxConfigRequest,
            Payload::GetDmxConfigResponse(_) => MessageType::GetDmxConfigResponse,
            Payload::SetDmxConfig(_) => MessageType::SetDmxConfig,
            Payload::SetDmxPath(_) => MessageType::SetDmxPath,
        }
    }

    /// Decode the payload record selected by `message_type`.
    pub fn decode_with<I: Input + ?Sized>(
        message_type: MessageType,
        buffer: &mut I,
    ) -> Result<Self, CodecError> {
        Ok(match message_type {
            MessageType::None => Payload::None,
            MessageType::PingRequest => Payload::PingRequest(PingRequest::decode(buffer)?),
            MessageType::PingResponse => Payload::PingResponse(PingResponse::decode(buffer)?),
            MessageType::NotifyBmpStatus => Payload::NotifyBmpStatus(BmpStatus::decode(buffer)?),
            MessageType::NotifyWinchStatus => {
                Payload::NotifyWinchStatus(WinchStatus::decode(buffer)?)
            }
            MessageType::GetWinchTargetsRequest => Payload::GetWinchTargetsRequest,
            MessageType::GetWinchTargetsResponse => {
                Payload::GetWinchTargetsResponse(TargetList::decode(buffer)?)
            }
            MessageType::GetWinchConfigRequest => Payload::GetWinchConfigRequest,
            MessageType::GetWinchConfigResponse => {
                Payload::GetWinchConfigResponse(WinchConfig::decode(buffer)?)
            }
            MessageType::SetWinchConfig => Payload::SetWinchConfig(WinchConfig::decode(buffer)?),
            MessageType::SetWinchPath => Payload::SetWinchPath(WinchPath::decode(buffer)?),
            MessageType::GetDmxTargetsRequest => Payload::GetDmxTargetsRequest,
            MessageType::GetDmxTargetsResponse => {
                Payload::GetDmxTargetsResponse(TargetList::decode(buffer)?)
            }
            MessageType::GetDmxConfigRequest => Payload::GetDmxConfigRequest,
            MessageType::GetDmxConfigResponse => {
                Payload::GetDmxConfigResponse(DmxConfig::decode(buffer)?)
            }
            MessageType::SetDmxConfig => Payload::SetDmxConfig(DmxConfig::decode(buffer)?),
            MessageType::SetDmxPath => Payload::SetDmxPath(DmxPath::decode(buffer)?),
        })
    }
}

impl Serialize for Payload {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        match self {
            Payload::None
            | Payload::GetWinchTargetsRequest
            | Payload::GetWinchConfigRequest
            | Payload::GetDmxTargetsRequest
            | Payload::GetDmxConfigRequest => Ok(()),
            Payload::PingRequest(payload) => payload.encode(buffer),
            Payload::PingResponse(payload) => payload.encode(buffer),
            Payload::NotifyBmpStatus(payload) => payload.encode(buffer),
            Payload::NotifyWinchStatus(payload) => payload.encode(buffer),
            Payload::GetWinchTargetsResponse(payload) => payload.encode(buffer),
            Payload::GetWinchConfigResponse(payload) => payload.encode(buffer),
            Payload::SetWinchConfig(payload) => payload.encode(buffer),
            Payload::SetWinchPath(payload) => payload.encode(buffer),
            Payload::GetDmxTargetsResponse(payload) => payload.encode(buffer),
            Payload::GetDmxConfigResponse(payload) => payload.encode(buffer),
            Payload::SetDmxConfig(payload) => payload.encode(buffer),
            Payload::SetDmxPath(payload) => payload.encode(buffer),
        }
    }
}

/// A framed message: addressing header plus typed payload.
///
/// Encoding computes `payload_size` from the payload itself; decoding reads
/// exactly `payload_size` bytes and fails with
/// [`CodecError::PayloadSizeMismatch`] when the payload record does not
/// occupy the window exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Device the message addresses, or the sender for notifications.
    pub target_id: TargetId,
    /// The typed payload.
    pub payload: Payload,
}

impl Message {
    /// Frame `payload` for `target_id`.
    pub fn new(target_id: TargetId, payload: Payload) -> Self {
        Self { target_id, payload }
    }
}

impl Serialize for Message {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        let payload = self.payload.to_bytes()?;
        let header = MessageHeader {
            target_id: self.target_id,
            message_type: self.payload.message_type(),
            payload_size: u16::try_from(payload.len()).map_err(|_| CodecError::LengthOverflow)?,
        };
        header.encode(buffer)?;
        buffer.write(&payload)
    }
}

impl Deserialize for Message {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        let header = MessageHeader::decode(buffer)?;
        debug!(
            target_id = header.target_id,
            message_type = ?header.message_type,
            payload_size = header.payload_size,
            "decoding message"
        );

        let mut window = vec![0u8; header.payload_size as usize];
        buffer.read(&mut window)?;
        let mut window = window.as_slice();
        let payload = Payload::decode_with(header.message_type, &mut window)?;
        if window.remaining() != 0 {
            return Err(CodecError::PayloadSizeMismatch {
                header: header.payload_size,
                payload: header.payload_size as usize - window.remaining(),
            });
        }
        Ok(Self {
            target_id: header.target_id,
            payload,
        })
    }
}
