//! Embassy tasks and the hardware adapters they own
pub mod buzzer;
pub mod control_cycle;
pub mod light_strips;
pub mod rc_link;
pub mod wheels;
