//! Control cycle
//!
//! The one task that moves the robot. Every [`CYCLE_PERIOD`] it samples the
//! battery, takes the newest control frame if one arrived, runs the arbiter and
//! applies the result to the wheels, light strips, buzzer and status LED.
//!
//! All actuators are owned here, so no other task can fight the arbiter over
//! an output.

use defmt::{info, warn};
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_time::{Duration, Instant, Ticker};
use mecanum_arbiter::config::ArbiterConfig;
use mecanum_arbiter::engine::{CycleReport, Override, Tone};
use mecanum_arbiter::{Arbiter, CycleInput};

use crate::system::link;
use crate::system::resources::{
    BatterySenseResources, BuzzerResources, Irqs, LightStripResources, StatusLedResources,
    WheelResources,
};
use crate::task::buzzer::Buzzer;
use crate::task::light_strips::LightStrips;
use crate::task::wheels::Wheels;

/// Arbiter cadence
const CYCLE_PERIOD: Duration = Duration::from_millis(10);

/// RP2350 ADC: 3.3 V reference, 12-bit
const ADC_REFERENCE_VOLTS: f32 = 3.3;
const ADC_RANGE: f32 = 4096.0;

/// Everything the control cycle drives
pub struct ControlResources {
    pub wheels: WheelResources,
    pub light_strips: LightStripResources,
    pub buzzer: BuzzerResources,
    pub battery_sense: BatterySenseResources,
    pub status_led: StatusLedResources,
}

#[embassy_executor::task]
pub async fn control_cycle(r: ControlResources) {
    let mut wheels = Wheels::new(r.wheels);
    let mut strips = LightStrips::new(r.light_strips);
    let mut buzzer = Buzzer::new(r.buzzer);
    let mut status_led = Output::new(r.status_led.pin, Level::Low);

    let mut adc = Adc::new(r.battery_sense.adc, Irqs, adc::Config::default());
    let mut battery_channel = Channel::new_pin(r.battery_sense.pin, Pull::None);

    let config = ArbiterConfig::DEFAULT.with_adc(ADC_REFERENCE_VOLTS, ADC_RANGE);
    let mut arbiter = Arbiter::new(config);

    let mut applied_tone = Tone::Silent;
    buzzer.play(applied_tone);
    let mut last_override = None;

    info!("control cycle running every {} ms", CYCLE_PERIOD.as_millis());

    let mut ticker = Ticker::every(CYCLE_PERIOD);
    loop {
        ticker.next().await;

        // A failed conversion reads as a flat pack, which stops the robot.
        let battery_sample = match adc.read(&mut battery_channel).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("battery adc error: {:?}", e);
                0
            }
        };

        let out = arbiter.tick(CycleInput {
            now: Instant::now().as_millis() as u32,
            frame: link::try_take(),
            battery_sample,
        });

        wheels.apply(&out.wheels);
        strips.show(&out.strips).await;
        if out.tone != applied_tone {
            buzzer.play(out.tone);
            applied_tone = out.tone;
        }
        status_led.set_level(Level::from(out.status_led));

        log_report(&out.report, last_override);
        last_override = out.report.override_active;
    }
}

/// Logs what changed this cycle.
fn log_report(report: &CycleReport, last_override: Option<Override>) {
    for transition in report.transitions.iter() {
        info!(
            "button {:?} {}",
            transition.button,
            if transition.pressed { "pressed" } else { "released" }
        );
    }

    if report.override_active == last_override {
        return;
    }
    match (last_override, report.override_active) {
        (_, Some(Override::LowBattery)) => {
            warn!("battery low at {} V, lockout", report.battery_voltage)
        }
        (_, Some(Override::LinkLost)) => warn!("control link lost, stopping"),
        (Some(Override::LowBattery), None) => {
            info!("battery recovered at {} V", report.battery_voltage)
        }
        (Some(Override::LinkLost), None) => info!("control link restored"),
        (None, None) => {}
    }
}
