//! Build-time tuning constants
//!
//! Every interval, threshold and scale the arbiter uses is fixed here. The
//! constants are collected in [`ArbiterConfig`] so the firmware can override the
//! few values that depend on its board (the ADC scale) without touching the rest.

/// Lowest reading of an axis dead zone. Readings below this are deflected.
pub const DEADBAND_LOW: u16 = 500;

/// Highest reading of an axis dead zone. Readings above this are deflected.
pub const DEADBAND_HIGH: u16 = 550;

/// Full-scale reading of a 10-bit axis or slider.
pub const AXIS_MAX: u16 = 1023;

/// Reading reported by a centered stick.
pub const AXIS_CENTER: u16 = 511;

/// A raw button reading must hold longer than this before it is confirmed (ms)
pub const DEBOUNCE_MS: u32 = 100;

/// Turn-signal phase flips at this period (ms)
pub const BLINK_INTERVAL_MS: u32 = 500;

/// Link is declared lost after this long without a frame (ms)
pub const FAILSAFE_INTERVAL_MS: u32 = 2000;

/// Smallest magnitude commanded to a wheel that is meant to move
pub const SPEED_MIN: u8 = 80;

/// Largest wheel magnitude, and the ceiling with the sliders fully down
pub const SPEED_MAX: u8 = 255;

/// Battery at or below this voltage locks the robot out (V)
pub const MIN_BATTERY_VOLTAGE: f32 = 6.8;

/// Upper resistor of the battery sense divider (ohm)
pub const DIVIDER_R1: f32 = 30_000.0;

/// Lower resistor of the battery sense divider (ohm)
pub const DIVIDER_R2: f32 = 7_500.0;

/// ADC reference voltage of the controller board the formula was calibrated on (V)
pub const ADC_REFERENCE_VOLTS: f32 = 5.0;

/// ADC full-scale count of the controller board the formula was calibrated on
pub const ADC_RANGE: f32 = 1024.0;

/// Tone played while the user alert is on (Hz). Low battery plays half of this.
pub const ALERT_TONE_HZ: u32 = 1000;

/// Addressable LEDs on each of the front and back strips
pub const LEDS_PER_STRIP: usize = 8;

/// Complete set of tunables consumed by [`crate::Arbiter`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArbiterConfig {
    pub deadband_low: u16,
    pub deadband_high: u16,
    pub debounce_ms: u32,
    pub blink_interval_ms: u32,
    pub failsafe_interval_ms: u32,
    pub speed_min: u8,
    pub min_battery_voltage: f32,
    pub divider_r1: f32,
    pub divider_r2: f32,
    /// ADC reference voltage (V)
    pub adc_reference_volts: f32,
    /// ADC full-scale count
    pub adc_range: f32,
    pub alert_tone_hz: u32,
}

impl ArbiterConfig {
    /// Reference configuration: 10-bit 5 V ADC and the constants above.
    pub const DEFAULT: Self = Self {
        deadband_low: DEADBAND_LOW,
        deadband_high: DEADBAND_HIGH,
        debounce_ms: DEBOUNCE_MS,
        blink_interval_ms: BLINK_INTERVAL_MS,
        failsafe_interval_ms: FAILSAFE_INTERVAL_MS,
        speed_min: SPEED_MIN,
        min_battery_voltage: MIN_BATTERY_VOLTAGE,
        divider_r1: DIVIDER_R1,
        divider_r2: DIVIDER_R2,
        adc_reference_volts: ADC_REFERENCE_VOLTS,
        adc_range: ADC_RANGE,
        alert_tone_hz: ALERT_TONE_HZ,
    };

    /// Same configuration with a different ADC scale.
    pub const fn with_adc(mut self, reference_volts: f32, range: f32) -> Self {
        self.adc_reference_volts = reference_volts;
        self.adc_range = range;
        self
    }

    /// Tone played by the battery lockout (Hz)
    pub const fn low_battery_tone_hz(&self) -> u32 {
        self.alert_tone_hz / 2
    }
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
