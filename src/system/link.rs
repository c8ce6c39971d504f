//! Control Frame Link
//!
//! Hands decoded control frames from the radio task to the control cycle.
//! An embassy-sync Signal holds at most one value, so a frame that arrives
//! before the previous one was taken simply replaces it: the cycle always sees
//! the newest frame and never a backlog.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use mecanum_arbiter::frame::ControlFrame;

/// Latest frame not yet consumed by the control cycle
static LATEST_FRAME: Signal<CriticalSectionRawMutex, ControlFrame> = Signal::new();

/// Publishes a freshly received frame, replacing any unconsumed one
pub fn publish(frame: ControlFrame) {
    LATEST_FRAME.signal(frame);
}

/// Takes the pending frame, if one arrived since the last call
///
/// Never blocks; the control cycle polls this once per tick.
pub fn try_take() -> Option<ControlFrame> {
    LATEST_FRAME.try_take()
}
