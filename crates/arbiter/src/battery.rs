//! Battery guard
//!
//! Converts a raw ADC sample into the pack voltage and trips the undervoltage
//! lockout at or below the threshold.
//!
//! # Voltage Calculations
//! ```text
//! ADC Voltage     = sample * reference / range
//! Battery Voltage = ADC Voltage / (R2 / (R1 + R2))
//! ```
//! With the reference 5 V / 1024 counts ADC and a 30 kΩ / 7.5 kΩ divider, a
//! sample of 700 reads 17.09 V.
//!
//! There is no hysteresis: a pack sitting exactly on the threshold can flip
//! between states on consecutive cycles.

use crate::config::ArbiterConfig;

/// Battery condition for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryStatus {
    Normal,
    Low,
}

/// Pack voltage from a raw ADC sample.
pub fn battery_voltage(sample: u16, config: &ArbiterConfig) -> f32 {
    let adc_voltage = f32::from(sample) * config.adc_reference_volts / config.adc_range;
    adc_voltage / (config.divider_r2 / (config.divider_r1 + config.divider_r2))
}

/// Undervoltage lockout threshold
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryGuard {
    threshold: f32,
}

impl BatteryGuard {
    pub const fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Classifies one voltage estimate. Stateless, so recovery is immediate.
    pub fn evaluate(&self, voltage: f32) -> BatteryStatus {
        if voltage <= self.threshold {
            BatteryStatus::Low
        } else {
            BatteryStatus::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn divider_formula() {
        let voltage = battery_voltage(700, &ArbiterConfig::DEFAULT);
        assert!(close(voltage, 17.09), "got {}", voltage);
    }

    #[test]
    fn divider_formula_with_board_adc() {
        let config = ArbiterConfig::DEFAULT.with_adc(3.3, 4096.0);
        // 2048 counts = 1.65 V at the pin, x5 through the divider
        assert!(close(battery_voltage(2048, &config), 8.25));
    }

    #[test]
    fn threshold_is_inclusive() {
        let guard = BatteryGuard::new(6.8);
        assert_eq!(guard.evaluate(6.8), BatteryStatus::Low);
        assert_eq!(guard.evaluate(6.5), BatteryStatus::Low);
        assert_eq!(guard.evaluate(6.81), BatteryStatus::Normal);
    }

    #[test]
    fn raw_samples_around_threshold() {
        let config = ArbiterConfig::DEFAULT;
        let guard = BatteryGuard::new(config.min_battery_voltage);
        // 278 counts -> 6.79 V, 279 counts -> 6.81 V
        assert_eq!(guard.evaluate(battery_voltage(278, &config)), BatteryStatus::Low);
        assert_eq!(guard.evaluate(battery_voltage(279, &config)), BatteryStatus::Normal);
    }
}
