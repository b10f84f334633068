use bitflags::bitflags;
use winch_types::{CodecError, Deserialize, DeviceTime, Input, Output, Serialize};

/// Pressure/temperature sensor notification.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BmpStatus {
    /// Device clock at the time of the sample.
    pub device_time: DeviceTime,
    /// Air temperature.
    pub celsius: f32,
    /// Barometric pressure.
    pub pascals: f32,
}

impl BmpStatus {
    /// Encoded size in bytes.
    pub const LEN: usize = 12;
}

impl Serialize for BmpStatus {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        self.device_time.encode(buffer)?;
        self.celsius.encode(buffer)?;
        self.pascals.encode(buffer)
    }
}

impl Deserialize for BmpStatus {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        Ok(Self {
            device_time: u32::decode(buffer)?,
            celsius: f32::decode(buffer)?,
            pascals: f32::decode(buffer)?,
        })
    }
}

bitflags! {
    /// Flag bits of a [`WinchStatus`].
    pub struct WinchStatusFlags: u8 {
        /// The reported position is valid.
        const POSITION_KNOWN = 0x01;
        /// Limit switch 1 is engaged.
        const LIMIT1 = 0x02;
        /// Limit switch 2 is engaged.
        const LIMIT2 = 0x04;
    }
}

/// Winch state notification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinchStatus {
    /// Device clock at the time of the sample.
    pub device_time: DeviceTime,
    /// Linear position of the winch, when known.
    pub position: u32,
    /// Bitwise-or of [`WinchStatusFlags`].
    pub flags: u8,
}

impl WinchStatus {
    /// Encoded size in bytes.
    pub const LEN: usize = 9;

    /// Interpreted flag bits (unknown bits dropped).
    pub fn status_flags(&self) -> WinchStatusFlags {
        WinchStatusFlags::from_bits_truncate(self.flags)
    }
}

impl Serialize for WinchStatus {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        self.device_time.encode(buffer)?;
        self.position.encode(buffer)?;
        self.flags.encode(buffer)
    }
}

impl Deserialize for WinchStatus {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        Ok(Self {
            device_time: u32::decode(buffer)?,
            position: u32::decode(buffer)?,
            flags: u8::decode(buffer)?,
        })
    }
}
