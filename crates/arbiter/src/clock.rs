//! Millisecond timestamps
//!
//! All timing in the arbiter is measured against a free-running 32-bit
//! millisecond counter supplied by the caller. The counter wraps after ~49 days,
//! so intervals are always computed with wrapping subtraction.

/// Monotonic millisecond counter value
pub type Millis = u32;

/// Milliseconds elapsed from `since` to `now`, correct across one counter wrap.
#[inline]
pub fn elapsed(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}
