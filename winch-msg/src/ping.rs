use winch_types::{CodecError, Deserialize, DeviceTime, Input, Output, Serialize};

/// Liveness probe sent by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PingRequest {
    /// Correlates the response with this request.
    pub ping_id: u32,
}

impl PingRequest {
    /// Encoded size in bytes.
    pub const LEN: usize = 4;
}

impl Serialize for PingRequest {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        self.ping_id.encode(buffer)
    }
}

impl Deserialize for PingRequest {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        Ok(Self {
            ping_id: u32::decode(buffer)?,
        })
    }
}

/// Device answer to a [`PingRequest`], stamped with its clock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PingResponse {
    /// Echo of the request's id.
    pub ping_id: u32,
    /// Device clock at the time of the response.
    pub device_time: DeviceTime,
}

impl PingResponse {
    /// Encoded size in bytes.
    pub const LEN: usize = 8;
}

impl Serialize for PingResponse {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        self.ping_id.encode(buffer)?;
        self.device_time.encode(buffer)
    }
}

impl Deserialize for PingResponse {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        Ok(Self {
            ping_id: u32::decode(buffer)?,
            device_time: u32::decode(buffer)?,
        })
    }
}
