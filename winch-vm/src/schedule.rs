//! Wrap-aware segment selection.

use winch_asm::{Path, PathSegment};
use winch_types::DeviceTime;

/// Default forward horizon: half the clock range.
pub const DEFAULT_HORIZON: u32 = 1 << 31;

/// Select the segment active at `time`.
///
/// Start times are monotonic modulo 2³², so ordinary comparison breaks on
/// paths whose ordering crosses the wrap boundary. A segment is a candidate
/// when `time − start_time` (mod 2³²) is less than `horizon`; the candidate
/// with the smallest difference, i.e. the most recently started, is active.
pub fn active_segment(path: &Path, time: DeviceTime, horizon: u32) -> Option<&PathSegment> {
    path.segments()
        .iter()
        .map(|segment| (time.wrapping_sub(segment.start_time()), segment))
        .filter(|&(age, _)| age < horizon)
        .min_by_key(|&(age, _)| age)
        .map(|(_, segment)| segment)
}
