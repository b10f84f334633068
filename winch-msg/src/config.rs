use winch_types::{CodecError, Deserialize, Input, Output, Serialize, TargetId};

/// Winch drive-train calibration.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinchConfig {
    /// Stepper motor steps per revolution in the forward direction.
    pub steps_per_rev: i16,
    /// Encoder ticks per revolution in the forward direction.
    pub ticks_per_rev: i16,
    /// Linear distance per revolution (circumference).
    pub distance_per_rev: f32,
}

impl WinchConfig {
    /// Encoded size in bytes.
    pub const LEN: usize = 8;
}

impl Serialize for WinchConfig {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        self.steps_per_rev.encode(buffer)?;
        self.ticks_per_rev.encode(buffer)?;
        self.distance_per_rev.encode(buffer)
    }
}

impl Deserialize for WinchConfig {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        Ok(Self {
            steps_per_rev: i16::decode(buffer)?,
            ticks_per_rev: i16::decode(buffer)?,
            distance_per_rev: f32::decode(buffer)?,
        })
    }
}

/// Device ids enumerated by a targets response.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetList {
    /// Ids of the devices present on the bus.
    pub target_ids: Vec<TargetId>,
}

impl Serialize for TargetList {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        let count =
            u8::try_from(self.target_ids.len()).map_err(|_| CodecError::LengthOverflow)?;
        count.encode(buffer)?;
        buffer.write(&self.target_ids)
    }
}

impl Deserialize for TargetList {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        let count = u8::decode(buffer)? as usize;
        let mut target_ids = vec![0u8; count];
        buffer.read(&mut target_ids)?;
        Ok(Self { target_ids })
    }
}

/// DMX channel mapping for one lighting device.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DmxConfig {
    /// Added to every value in the map to get the output DMX channel.
    pub channel_offset: u8,
    /// Path output index to DMX channel mapping.
    pub channel_map: Vec<u8>,
}

impl Serialize for DmxConfig {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        let size =
            u8::try_from(self.channel_map.len()).map_err(|_| CodecError::LengthOverflow)?;
        self.channel_offset.encode(buffer)?;
        size.encode(buffer)?;
        buffer.write(&self.channel_map)
    }
}

impl Deserialize for DmxConfig {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        let channel_offset = u8::decode(buffer)?;
        let size = u8::decode(buffer)? as usize;
        let mut channel_map = vec![0u8; size];
        buffer.read(&mut channel_map)?;
        Ok(Self {
            channel_offset,
            channel_map,
        })
    }
}
