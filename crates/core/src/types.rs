//! Scalar types used across the log
//!
//! Offsets are assigned by the log and are always positive. Callers, however,
//! hand offsets in from loosely-typed input, so requests carry a signed
//! integer that the engine clamps with [`clamp_offset`] before use.

/// Position of a record within its queue.
///
/// 1-based, dense, strictly increasing. `0` is never assigned and stands for
/// "nothing" (e.g. no committed record yet).
pub type Offset = u64;

/// Opaque caller-supplied record value.
pub type Payload = i64;

/// Offset assigned to the first record of every queue.
pub const FIRST_OFFSET: Offset = 1;

/// Sentinel meaning "no record", returned as the watermark of a queue with
/// nothing committed.
pub const NO_OFFSET: Offset = 0;

/// Convert a caller-supplied offset into an [`Offset`].
///
/// Negative values clamp to [`NO_OFFSET`].
///
/// # Examples
///
/// ```
/// use offsetlog_core::clamp_offset;
///
/// assert_eq!(clamp_offset(-5), 0);
/// assert_eq!(clamp_offset(7), 7);
/// ```
#[inline]
pub fn clamp_offset(raw: i64) -> Offset {
    u64::try_from(raw).unwrap_or(NO_OFFSET)
}
