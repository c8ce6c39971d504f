//! Wheel motor outputs
//!
//! Drives the four mecanum wheels through an L298P-style driver. Each channel
//! has one direction pin and one PWM input; the PWM duty carries the speed.
//!
//! # PWM
//! Two slices at 10 kHz, each slice serving two wheels on its A and B outputs.

use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{self, Pwm, PwmOutput, SetDutyCycle};
use mecanum_arbiter::kinematics::{WheelCommand, WheelSet};

use crate::system::resources::WheelResources;

/// PWM frequency for the wheel motors
const PWM_FREQ_HZ: u32 = 10_000;

/// One driver channel
pub struct Wheel {
    dir: Output<'static>,
    pwm: PwmOutput<'static>,
}

impl Wheel {
    fn new(dir: Output<'static>, pwm: PwmOutput<'static>) -> Self {
        Self { dir, pwm }
    }

    /// Sets direction then duty. Forward is the direction pin driven low.
    pub fn apply(&mut self, command: WheelCommand) {
        if command.forward {
            self.dir.set_low();
        } else {
            self.dir.set_high();
        }
        let _ = self
            .pwm
            .set_duty_cycle_fraction(u16::from(command.magnitude), u16::from(u8::MAX));
    }
}

/// All four wheels in the order the kinematics lays them out
pub struct Wheels {
    front_left: Wheel,
    front_right: Wheel,
    back_left: Wheel,
    back_right: Wheel,
}

impl Wheels {
    /// Configures both PWM slices and the direction pins, all wheels stopped.
    pub fn new(r: WheelResources) -> Self {
        let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();

        // Smallest divider that keeps the period within 16 bits
        let divider = ((clock_freq_hz / PWM_FREQ_HZ) / 65535 + 1) as u8;
        let period = (clock_freq_hz / (PWM_FREQ_HZ * divider as u32)) as u16 - 1;

        let mut pwm_config = pwm::Config::default();
        pwm_config.divider = divider.into();
        pwm_config.top = period;

        // front axle on slice A/B outputs
        let (front_left_pwm, front_right_pwm) = Pwm::new_output_ab(
            r.front_slice,
            r.front_left_pwm,
            r.front_right_pwm,
            pwm_config.clone(),
        )
        .split();
        // back axle
        let (back_left_pwm, back_right_pwm) =
            Pwm::new_output_ab(r.back_slice, r.back_left_pwm, r.back_right_pwm, pwm_config).split();

        // Both outputs were requested, so both halves are present.
        let (
            Some(front_left_pwm),
            Some(front_right_pwm),
            Some(back_left_pwm),
            Some(back_right_pwm),
        ) = (front_left_pwm, front_right_pwm, back_left_pwm, back_right_pwm)
        else {
            defmt::panic!("wheel pwm outputs missing");
        };

        // direction pins start low (forward), duty zero
        let mut wheels = Self {
            front_left: Wheel::new(Output::new(r.front_left_dir, Level::Low), front_left_pwm),
            front_right: Wheel::new(Output::new(r.front_right_dir, Level::Low), front_right_pwm),
            back_left: Wheel::new(Output::new(r.back_left_dir, Level::Low), back_left_pwm),
            back_right: Wheel::new(Output::new(r.back_right_dir, Level::Low), back_right_pwm),
        };
        wheels.apply(&WheelSet::STOPPED);
        wheels
    }

    /// Writes one command to each wheel.
    pub fn apply(&mut self, set: &WheelSet) {
        self.front_left.apply(set.front_left);
        self.front_right.apply(set.front_right);
        self.back_left.apply(set.back_left);
        self.back_right.apply(set.back_right);
    }
}
