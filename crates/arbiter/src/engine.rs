//! Control cycle
//!
//! [`Arbiter`] owns every piece of mutable state and runs one pass of the
//! pipeline per [`Arbiter::tick`]:
//!
//! ```text
//! battery guard --low--> stop, lights off, low-battery tone
//!      |
//! link watchdog <-- frame arrived?
//!      |
//!      +-- frame:     debounce -> drive state -> kinematics -> hold result
//!      +-- lost:      hold stop, signals off
//!      +-- otherwise: keep holding the last result
//!      |
//! blink timer -> strip renderer
//! ```
//!
//! Nothing is latched. Every override is evaluated again on the next cycle and
//! clears itself once its cause is gone. Held wheel commands are replaced by a
//! stop while an override is active, so after recovery the robot waits for the
//! next frame before moving.

use crate::battery::{battery_voltage, BatteryGuard, BatteryStatus};
use crate::clock::Millis;
use crate::config::ArbiterConfig;
use crate::debounce::{ButtonBank, Transitions};
use crate::frame::ControlFrame;
use crate::indicator::{render, BlinkTimer, LightRequest, StripPair};
use crate::kinematics::{IndicatorSide, Kinematics, WheelSet};
use crate::state::DriveState;
use crate::watchdog::LinkWatchdog;

/// Inputs sampled at the start of a cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleInput {
    /// Monotonic millisecond counter
    pub now: Millis,
    /// Newest frame received since the previous cycle, if any
    pub frame: Option<ControlFrame>,
    /// Raw battery ADC sample
    pub battery_sample: u16,
}

/// Buzzer request for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    Silent,
    /// User alert, toggled from the remote
    Alert(u32),
    /// Undervoltage lockout, half the alert frequency
    LowBattery(u32),
}

impl Tone {
    /// Frequency to generate, `None` for silence
    pub fn frequency(self) -> Option<u32> {
        match self {
            Tone::Silent => None,
            Tone::Alert(hz) | Tone::LowBattery(hz) => Some(hz),
        }
    }
}

/// Safety override in effect for a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Override {
    LowBattery,
    LinkLost,
}

/// What happened during a cycle, for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// A frame was decoded into commands this cycle
    pub frame_consumed: bool,
    /// Confirmed button transitions applied this cycle
    pub transitions: Transitions,
    pub override_active: Option<Override>,
    pub battery_voltage: f32,
}

/// Everything the firmware has to apply after a cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutput {
    pub wheels: WheelSet,
    pub side: IndicatorSide,
    pub strips: StripPair,
    pub tone: Tone,
    /// Activity LED: frame processed or an override active
    pub status_led: bool,
    pub report: CycleReport,
}

/// Motion and signal arbitration engine
#[derive(Debug, Clone)]
pub struct Arbiter {
    config: ArbiterConfig,
    kinematics: Kinematics,
    buttons: ButtonBank,
    state: DriveState,
    watchdog: LinkWatchdog,
    battery: BatteryGuard,
    blink: BlinkTimer,
    held_wheels: WheelSet,
    held_side: IndicatorSide,
}

impl Arbiter {
    pub fn new(config: ArbiterConfig) -> Self {
        Self {
            kinematics: Kinematics::new(&config),
            buttons: ButtonBank::new(config.debounce_ms),
            state: DriveState::new(),
            watchdog: LinkWatchdog::new(config.failsafe_interval_ms),
            battery: BatteryGuard::new(config.min_battery_voltage),
            blink: BlinkTimer::new(config.blink_interval_ms),
            held_wheels: WheelSet::STOPPED,
            held_side: IndicatorSide::NONE,
            config,
        }
    }

    /// Runs one control cycle.
    pub fn tick(&mut self, input: CycleInput) -> CycleOutput {
        let now = input.now;
        let voltage = battery_voltage(input.battery_sample, &self.config);
        let mut report = CycleReport {
            frame_consumed: false,
            transitions: Transitions::new(),
            override_active: None,
            battery_voltage: voltage,
        };

        if self.battery.evaluate(voltage) == BatteryStatus::Low {
            // The pending frame is dropped unseen; the link timestamp is left alone.
            self.state.suppress_lights();
            self.hold_stop();
            report.override_active = Some(Override::LowBattery);
            let tone = Tone::LowBattery(self.config.low_battery_tone_hz());
            return self.finish(now, tone, report);
        }

        self.watchdog.observe(input.frame.is_some(), now);

        if let Some(frame) = input.frame {
            report.transitions = self.buttons.process(&frame, now);
            for transition in report.transitions.iter() {
                self.state.apply(transition);
            }
            let motion = self.kinematics.resolve(&frame, self.state.mode);
            self.held_wheels = motion.wheels;
            self.held_side = motion.indicator_side(self.state.indicator_blink_enabled);
            report.frame_consumed = true;
        } else if self.watchdog.is_lost(now) {
            self.hold_stop();
            report.override_active = Some(Override::LinkLost);
        }

        let tone = if self.state.alert_tone {
            Tone::Alert(self.config.alert_tone_hz)
        } else {
            Tone::Silent
        };
        self.finish(now, tone, report)
    }

    fn hold_stop(&mut self) {
        self.held_wheels = WheelSet::STOPPED;
        self.held_side = IndicatorSide::NONE;
    }

    fn finish(&mut self, now: Millis, tone: Tone, report: CycleReport) -> CycleOutput {
        let phase = self.blink.tick(self.held_side.any(), now);
        let request = LightRequest {
            front_light_on: self.state.front_light_on,
            back_light_on: self.state.back_light_on,
            side: self.held_side,
        };

        CycleOutput {
            wheels: self.held_wheels,
            side: self.held_side,
            strips: render(&request, phase),
            tone,
            status_led: report.frame_consumed || report.override_active.is_some(),
            report,
        }
    }

    /// Confirmed drive mode and feature flags
    pub fn state(&self) -> &DriveState {
        &self.state
    }

    /// Whether the link watchdog has expired at `now`
    pub fn link_lost(&self, now: Millis) -> bool {
        self.watchdog.is_lost(now)
    }

    /// Current turn-signal phase
    pub fn blink_phase(&self) -> bool {
        self.blink.phase()
    }
}

impl Default for Arbiter {
    fn default() -> Self {
        Self::new(ArbiterConfig::DEFAULT)
    }
}
