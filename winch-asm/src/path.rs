use core::fmt;

use bitflags::bitflags;
use winch_types::{CodecError, Deserialize, DeviceTime, Input, Output, Serialize};

use crate::Expression;

bitflags! {
    /// Flag bits of a [`Path`] record.
    pub struct PathFlags: u8 {
        /// Segment start times wrap through the u32 boundary.
        const OVERFLOW = 0x01;
    }
}

/// One piece of a piecewise motion path: from `start_time` forward, the
/// device evaluates `expr`.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSegment {
    start_time: DeviceTime,
    expr: Expression,
}

impl PathSegment {
    /// Create a segment active from `start_time`.
    pub fn new(start_time: DeviceTime, expr: Expression) -> Self {
        Self { start_time, expr }
    }

    /// Device-clock tick this segment becomes active at.
    pub fn start_time(&self) -> DeviceTime {
        self.start_time
    }

    /// The segment's compiled expression.
    pub fn expr(&self) -> &Expression {
        &self.expr
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{start:{} expr:{}}}", self.start_time, self.expr)
    }
}

/// An ordered list of time-keyed segments.
///
/// Segments are kept in ascending start time modulo the u32 wrap; the
/// [`PathFlags::OVERFLOW`] bit marks a sequence that crosses the wrap
/// boundary. An empty path is valid.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    flags: u8,
    segments: Vec<PathSegment>,
}

impl Path {
    /// Fixed header bytes before the segment table.
    pub const HEADER_SIZE: usize = 4;

    /// Bytes per segment table entry.
    pub const SEGMENT_HEADER_SIZE: usize = 8;

    /// Create a path from segments, with no extra flag bits.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { flags: 0, segments }
    }

    /// Create a path carrying pre-set flag bits.
    pub fn with_flags(flags: u8, segments: Vec<PathSegment>) -> Self {
        Self { flags, segments }
    }

    /// Interpreted flag bits (unknown bits dropped).
    pub fn flags(&self) -> PathFlags {
        PathFlags::from_bits_truncate(self.flags)
    }

    /// The flags byte exactly as stored.
    pub fn raw_flags(&self) -> u8 {
        self.flags
    }

    /// The ordered segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True when the segment ordering crosses the u32 wrap boundary, i.e.
    /// the last start time is not strictly greater than the first.
    pub fn wraps(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => last.start_time <= first.start_time,
            _ => false,
        }
    }

    fn table_size(segment_count: usize) -> usize {
        Self::HEADER_SIZE + Self::SEGMENT_HEADER_SIZE * segment_count
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{flags:{}", self.flags)?;
        for segment in &self.segments {
            write!(f, " segment:{segment}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Path {
    fn encode<O: Output + ?Sized>(&self, buffer: &mut O) -> Result<(), CodecError> {
        let segment_size =
            u16::try_from(self.segments.len()).map_err(|_| CodecError::LengthOverflow)?;
        let mut flags = self.flags;
        if self.wraps() {
            flags |= PathFlags::OVERFLOW.bits();
        }

        segment_size.encode(buffer)?;
        flags.encode(buffer)?;
        0u8.encode(buffer)?; // reserved

        let header_size = Self::table_size(self.segments.len());
        let mut payload = Vec::new();
        for segment in &self.segments {
            let begin = payload.len();
            segment.expr.encode(&mut payload)?;
            let offset =
                u16::try_from(header_size + begin).map_err(|_| CodecError::LengthOverflow)?;
            let size =
                u16::try_from(payload.len() - begin).map_err(|_| CodecError::LengthOverflow)?;
            segment.start_time.encode(buffer)?;
            offset.encode(buffer)?;
            size.encode(buffer)?;
        }
        buffer.write(&payload)
    }
}

impl Deserialize for Path {
    fn decode<I: Input + ?Sized>(buffer: &mut I) -> Result<Self, CodecError> {
        let segment_size = u16::decode(buffer)? as usize;
        let flags = u8::decode(buffer)?;
        let _reserved = u8::decode(buffer)?;

        let mut segments = Vec::with_capacity(segment_size);
        if segment_size > 0 {
            let mut headers = Vec::with_capacity(segment_size);
            for _ in 0..segment_size {
                let start_time = u32::decode(buffer)?;
                let offset = u16::decode(buffer)?;
                let size = u16::decode(buffer)?;
                headers.push((start_time, offset, size));
            }

            // Offsets and sizes are 16-bit wire fields; their sums wrap the
            // way the wire arithmetic does.
            let header_size = Self::table_size(segment_size);
            let end_max = headers
                .iter()
                .map(|&(_, offset, size)| offset.wrapping_add(size) as usize)
                .max()
                .unwrap_or(0);
            let payload_size = end_max.saturating_sub(header_size);

            let mut payload = vec![0u8; payload_size];
            buffer.read(&mut payload)?;

            for (start_time, offset, size) in headers {
                let begin = offset as usize;
                let end = offset.wrapping_add(size) as usize;
                if begin < header_size {
                    return Err(CodecError::SegmentOffsetOutOfRange(offset));
                }
                if end < begin || end > header_size + payload_size {
                    return Err(CodecError::SegmentEndOutOfRange(end as u32));
                }
                let window = &payload[begin - header_size..end - header_size];
                let expr = Expression::from_bytes(window)?;
                segments.push(PathSegment::new(start_time, expr));
            }
        }

        Ok(Self { flags, segments })
    }
}
