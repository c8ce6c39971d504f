//! Mecanum rover firmware entry point
//!
//! Splits the board's peripherals and spawns the two tasks: the radio link
//! receiver and the control cycle that owns every actuator.

#![no_std]
#![no_main]

use crate::task::{
    control_cycle::{control_cycle, ControlResources},
    rc_link::rc_link,
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{
    AssignedResources, BatterySenseResources, BuzzerResources, LightStripResources,
    RadioLinkResources, StatusLedResources, WheelResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Shared resources and signals
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    let r = split_resources!(p);

    spawner.spawn(rc_link(r.radio_link)).unwrap();
    spawner
        .spawn(control_cycle(ControlResources {
            wheels: r.wheels,
            light_strips: r.light_strips,
            buzzer: r.buzzer,
            battery_sense: r.battery_sense,
            status_led: r.status_led,
        }))
        .unwrap();
}
