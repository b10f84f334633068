use winch_asm::Path;
use winch_types::{CodecError, Deserialize, Input, Output, Serialize};

/// How a winch interprets its path output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum WinchMode {
    /// Winch is disengaged, free spooling.
    #[default]
    Disengage = 0,
    /// Path output is extension velocity. Positive extends.
    LinearVelocity = 1,
    /// Path output is extension position. Positive extends.
    LinearPosition = 2,
}

impl From<WinchMode> for u8 {
    fn from(mode: WinchMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for WinchMode {
    type Error = CodecError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Ok(match b {
            0 => WinchMode::Disengage,
            1 => WinchMode::LinearVelocity,
            2 => WinchMode::LinearPosition,
            _ => return Err(CodecError::UnknownDiscriminant(b)),
        })
    }
}

/// Motion path command for one winch.
///
/// Wire layout: `u8 mode, u8 pad, u16 path_size`, then `path_size` bytes of
/// [`Path`] record.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinchPath {
    /// Output interpretation for this path.
    pub mode: WinchMode,
    /// The piecewise motion path.
    pub path: Path,
}

impl Serialize for WinchPath {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        let path = self.path.to_bytes()?;
        let path_size = u16::try_from(path.len()).map_err(|_| CodecError::LengthOverflow)?;
        u8::from(self.mode).encode(buffer)?;
        0u8.encode(buffer)?; // alignment pad
        path_size.encode(buffer)?;
        buffer.write(&path)
    }
}

impl Deserialize for WinchPath {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        let mode = WinchMode::try_from(u8::decode(buffer)?)?;
        buffer.skip(1)?;
        let path_size = u16::decode(buffer)? as usize;
        let mut window = vec![0u8; path_size];
        buffer.read(&mut window)?;
        let path = Path::from_bytes(&window)?;
        Ok(Self { mode, path })
    }
}

/// Channel-value path command for one lighting device.
///
/// Wire layout: `u16 pad, u16 path_size`, then the [`Path`] record.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DmxPath {
    /// The piecewise channel-value path.
    pub path: Path,
}

impl Serialize for DmxPath {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        let path = self.path.to_bytes()?;
        let path_size = u16::try_from(path.len()).map_err(|_| CodecError::LengthOverflow)?;
        0u16.encode(buffer)?; // alignment pad
        path_size.encode(buffer)?;
        buffer.write(&path)
    }
}

impl Deserialize for DmxPath {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        buffer.skip(2)?;
        let path_size = u16::decode(buffer)? as usize;
        let mut window = vec![0u8; path_size];
        buffer.read(&mut window)?;
        let path = Path::from_bytes(&window)?;
        Ok(Self { path })
    }
}
