//! Link watchdog
//!
//! Declares the radio link lost when no frame has been accepted for longer than
//! the failsafe interval. There is no latched fault: the next frame clears it.

use crate::clock::{elapsed, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkWatchdog {
    last_frame: Millis,
    timeout_ms: u32,
}

impl LinkWatchdog {
    /// Starts as if a frame had arrived at time zero.
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            last_frame: 0,
            timeout_ms,
        }
    }

    /// Records whether a frame arrived at `now`.
    pub fn observe(&mut self, frame_arrived: bool, now: Millis) {
        if frame_arrived {
            self.last_frame = now;
        }
    }

    pub fn is_lost(&self, now: Millis) -> bool {
        elapsed(now, self.last_frame) > self.timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_at_boot() {
        let watchdog = LinkWatchdog::new(2000);
        assert!(!watchdog.is_lost(0));
        assert!(!watchdog.is_lost(2000));
        assert!(watchdog.is_lost(2001));
    }

    #[test]
    fn frame_rearms_the_timeout() {
        let mut watchdog = LinkWatchdog::new(2000);
        watchdog.observe(true, 10_000);
        assert!(!watchdog.is_lost(12_000));
        assert!(watchdog.is_lost(12_001));

        watchdog.observe(false, 12_500);
        assert!(watchdog.is_lost(12_500));

        watchdog.observe(true, 12_600);
        assert!(!watchdog.is_lost(12_600));
        assert!(!watchdog.is_lost(14_600));
        assert!(watchdog.is_lost(14_601));
    }

    #[test]
    fn survives_counter_wrap() {
        let mut watchdog = LinkWatchdog::new(2000);
        watchdog.observe(true, u32::MAX - 999);
        assert!(!watchdog.is_lost(500));
        assert!(watchdog.is_lost(1_001));
    }
}
