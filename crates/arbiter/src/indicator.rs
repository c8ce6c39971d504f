//! Light strip patterns
//!
//! Builds the front and back WS2812 strip contents for one cycle. Zones are
//! painted in order, later zones overwriting earlier ones:
//! 1. static fill: white headlights on the front strip, red tail lights on the
//!    back strip, each gated by its own flag
//! 2. right turn signal over one half of each strip
//! 3. left turn signal over the other half
//!
//! Seen from outside the vehicle the back strip is mirrored, so the right
//! signal uses the upper half of the front strip and the lower half of the
//! back strip.
//!
//! Turn signals show amber in the on phase and black in the off phase.

use smart_leds::RGB8;

use crate::clock::{elapsed, Millis};
use crate::config::LEDS_PER_STRIP;
use crate::kinematics::IndicatorSide;

pub const HEADLIGHT: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};
pub const TAIL_LIGHT: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const TURN_SIGNAL: RGB8 = RGB8 {
    r: 255,
    g: 175,
    b: 0,
};
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Colors of one strip, index 0 first on the wire
pub type Strip = [RGB8; LEDS_PER_STRIP];

/// Turn-signal phase generator
///
/// Only advances while a signal is active. When both signals go off the phase
/// and the time of the last flip are kept as they are, so re-enabling a signal
/// resumes the cycle where it stopped instead of restarting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkTimer {
    phase: bool,
    last_flip: Millis,
    interval_ms: u32,
}

impl BlinkTimer {
    /// Phase on, last flip at time zero
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            phase: true,
            last_flip: 0,
            interval_ms,
        }
    }

    /// Advances the phase and returns it.
    pub fn tick(&mut self, active: bool, now: Millis) -> bool {
        if active && elapsed(now, self.last_flip) >= self.interval_ms {
            self.phase = !self.phase;
            self.last_flip = now;
        }
        self.phase
    }

    pub fn phase(&self) -> bool {
        self.phase
    }
}

/// Which lights the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightRequest {
    pub front_light_on: bool,
    pub back_light_on: bool,
    pub side: IndicatorSide,
}

/// Both strips, computed together and transmitted together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripPair {
    pub front: Strip,
    pub back: Strip,
}

impl StripPair {
    pub const DARK: Self = Self {
        front: [OFF; LEDS_PER_STRIP],
        back: [OFF; LEDS_PER_STRIP],
    };
}

const HALF: usize = LEDS_PER_STRIP / 2;

/// Paints both strips for `request` at blink `phase`.
pub fn render(request: &LightRequest, phase: bool) -> StripPair {
    let mut strips = StripPair::DARK;

    if request.front_light_on {
        strips.front.fill(HEADLIGHT);
    }
    if request.back_light_on {
        strips.back.fill(TAIL_LIGHT);
    }

    let signal = if phase { TURN_SIGNAL } else { OFF };

    if request.side.right {
        strips.front[HALF..].fill(signal);
        strips.back[..HALF].fill(signal);
    }
    if request.side.left {
        strips.front[..HALF].fill(signal);
        strips.back[HALF..].fill(signal);
    }

    strips
}
