//! Drive State Management
//!
//! Holds the drive mode and the feature flags. Confirmed button transitions
//! are the only writers, apart from the battery lockout which switches the
//! lights off. Kinematics and the indicator renderer read from here.
//!
//! Each flag follows the confirmed level of its button: confirmed pressed sets
//! it, confirmed released clears it. The remote's switches latch, so every
//! confirmed transition changes exactly one field exactly once.

use crate::debounce::ButtonTransition;
use crate::frame::ButtonId;

/// Which wheels are paired when the robot blends a turn into a translation
/// or strafes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// Wheels paired by side: both wheels on the turn side slow down together.
    /// Strafe input spins the two sides against each other.
    #[default]
    Translate,
    /// Wheels paired diagonally, and the rear-axle pivot on the left stick is
    /// unlocked.
    Pivot,
}

impl DriveMode {
    /// Whether the left stick may drive the rear axle on its own
    pub fn rotate_assist_enabled(self) -> bool {
        self == DriveMode::Pivot
    }
}

/// Confirmed drive mode and feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveState {
    pub mode: DriveMode,
    pub indicator_blink_enabled: bool,
    pub front_light_on: bool,
    pub back_light_on: bool,
    pub alert_tone: bool,
}

impl DriveState {
    /// Translate mode, every feature off
    pub const fn new() -> Self {
        Self {
            mode: DriveMode::Translate,
            indicator_blink_enabled: false,
            front_light_on: false,
            back_light_on: false,
            alert_tone: false,
        }
    }

    /// Applies one confirmed button transition.
    pub fn apply(&mut self, transition: ButtonTransition) {
        let pressed = transition.pressed;
        match transition.button {
            ButtonId::Mode => {
                self.mode = if pressed {
                    DriveMode::Pivot
                } else {
                    DriveMode::Translate
                };
            }
            ButtonId::Blink => self.indicator_blink_enabled = pressed,
            ButtonId::BackLight => self.back_light_on = pressed,
            ButtonId::FrontLight => self.front_light_on = pressed,
            ButtonId::Alert => self.alert_tone = pressed,
        }
    }

    /// Switches off every light feature. Used by the battery lockout.
    pub fn suppress_lights(&mut self) {
        self.indicator_blink_enabled = false;
        self.front_light_on = false;
        self.back_light_on = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: ButtonId) -> ButtonTransition {
        ButtonTransition {
            button,
            pressed: true,
        }
    }

    fn release(button: ButtonId) -> ButtonTransition {
        ButtonTransition {
            button,
            pressed: false,
        }
    }

    #[test]
    fn initial_state() {
        let state = DriveState::new();
        assert_eq!(state.mode, DriveMode::Translate);
        assert!(!state.mode.rotate_assist_enabled());
        assert!(!state.indicator_blink_enabled);
        assert!(!state.front_light_on);
        assert!(!state.back_light_on);
        assert!(!state.alert_tone);
        assert_eq!(state, DriveState::default());
    }

    #[test]
    fn each_button_drives_one_field() {
        let mut state = DriveState::new();

        state.apply(press(ButtonId::Mode));
        assert_eq!(state.mode, DriveMode::Pivot);
        assert!(state.mode.rotate_assist_enabled());

        state.apply(press(ButtonId::Blink));
        assert!(state.indicator_blink_enabled);

        state.apply(press(ButtonId::BackLight));
        assert!(state.back_light_on);
        assert!(!state.front_light_on);

        state.apply(press(ButtonId::FrontLight));
        assert!(state.front_light_on);

        state.apply(press(ButtonId::Alert));
        assert!(state.alert_tone);

        state.apply(release(ButtonId::Mode));
        assert_eq!(state.mode, DriveMode::Translate);
        assert!(state.alert_tone);
    }

    #[test]
    fn suppress_lights_leaves_mode_and_tone() {
        let mut state = DriveState {
            mode: DriveMode::Pivot,
            indicator_blink_enabled: true,
            front_light_on: true,
            back_light_on: true,
            alert_tone: true,
        };
        state.suppress_lights();
        assert_eq!(state.mode, DriveMode::Pivot);
        assert!(state.alert_tone);
        assert!(!state.indicator_blink_enabled);
        assert!(!state.front_light_on);
        assert!(!state.back_light_on);
    }
}
