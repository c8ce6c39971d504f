//! Piezo buzzer
//!
//! Square wave at the requested frequency and 50 % duty. The PWM slice is
//! reprogrammed on every tone change; silence keeps the slice running with a
//! zero compare value.

use embassy_rp::pwm::{self, Pwm};
use mecanum_arbiter::engine::Tone;

use crate::system::resources::BuzzerResources;

/// Passive buzzer on one PWM channel
pub struct Buzzer {
    pwm: Pwm<'static>,
    config: pwm::Config,
}

impl Buzzer {
    /// Configures the slice silent.
    pub fn new(r: BuzzerResources) -> Self {
        // start with a zero compare value, no sound until the first tone
        let mut config = pwm::Config::default();
        config.compare_a = 0;
        let pwm = Pwm::new_output_a(r.slice, r.pin, config.clone());
        Self { pwm, config }
    }

    /// Switches the output to `tone`, or silence for [`Tone::Silent`].
    pub fn play(&mut self, tone: Tone) {
        match tone.frequency() {
            Some(freq_hz) if freq_hz > 0 => {
                let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();

                // Calculate minimum divider needed to keep period under 16-bit limit
                let divider = ((clock_freq_hz / freq_hz) / 65535 + 1) as u8;
                let period = (clock_freq_hz / (freq_hz * divider as u32)) as u16 - 1;

                self.config.divider = divider.into();
                self.config.top = period;
                // 50 % duty
                self.config.compare_a = period / 2;
            }
            _ => self.config.compare_a = 0,
        }
        self.pwm.set_config(&self.config);
    }
}
