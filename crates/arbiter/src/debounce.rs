//! Button debouncing
//!
//! Remote buttons arrive as raw levels inside each frame. A level is only
//! confirmed once it has stayed unchanged for longer than the debounce window,
//! measured from the last time the raw level changed. Bounces shorter than the
//! window never reach the confirmed state.

use crate::clock::{elapsed, Millis};
use crate::frame::{ButtonId, ControlFrame};

/// Debounce state of a single button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    last_raw: bool,
    confirmed: bool,
    last_change: Millis,
}

impl Debouncer {
    /// Released, with the last change at time zero
    pub const fn new() -> Self {
        Self {
            last_raw: false,
            confirmed: false,
            last_change: 0,
        }
    }

    /// Feeds one raw reading taken at `now`.
    ///
    /// Returns the newly confirmed level when this reading completes a
    /// transition, `None` otherwise.
    pub fn update(&mut self, raw: bool, now: Millis, window_ms: u32) -> Option<bool> {
        if raw != self.last_raw {
            self.last_change = now;
        }
        self.last_raw = raw;

        if elapsed(now, self.last_change) > window_ms && raw != self.confirmed {
            self.confirmed = raw;
            return Some(raw);
        }
        None
    }

    /// Last confirmed level
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// A confirmed change of one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTransition {
    pub button: ButtonId,
    /// Confirmed level after the transition
    pub pressed: bool,
}

/// Transitions confirmed while processing one frame, in button order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transitions {
    items: [Option<ButtonTransition>; 5],
    len: usize,
}

impl Transitions {
    pub const fn new() -> Self {
        Self {
            items: [None; 5],
            len: 0,
        }
    }

    fn push(&mut self, transition: ButtonTransition) {
        self.items[self.len] = Some(transition);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ButtonTransition> + '_ {
        self.items[..self.len].iter().flatten().copied()
    }
}

impl Default for Transitions {
    fn default() -> Self {
        Self::new()
    }
}

/// One debouncer per active button
#[derive(Debug, Clone)]
pub struct ButtonBank {
    buttons: [Debouncer; 5],
    window_ms: u32,
}

impl ButtonBank {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            buttons: [Debouncer::new(); 5],
            window_ms,
        }
    }

    /// Debounces a single button and returns its confirmed level.
    pub fn update(&mut self, id: ButtonId, raw: bool, now: Millis) -> bool {
        let button = &mut self.buttons[id.index()];
        button.update(raw, now, self.window_ms);
        button.confirmed()
    }

    /// Runs every active button of `frame` through its debouncer.
    pub fn process(&mut self, frame: &ControlFrame, now: Millis) -> Transitions {
        let mut transitions = Transitions::new();
        for id in ButtonId::ALL {
            let raw = frame.button(id);
            if let Some(pressed) = self.buttons[id.index()].update(raw, now, self.window_ms) {
                transitions.push(ButtonTransition {
                    button: id,
                    pressed,
                });
            }
        }
        transitions
    }

    /// Confirmed level of one button
    pub fn confirmed(&self, id: ButtonId) -> bool {
        self.buttons[id.index()].confirmed()
    }
}
