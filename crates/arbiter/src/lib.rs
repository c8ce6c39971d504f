//! mecanum_arbiter - decision logic for a remotely driven mecanum robot
//!
//! Turns periodic remote-control frames into four wheel commands, two LED strip
//! patterns, a buzzer tone and a status flag. Link-loss and battery-undervoltage
//! overrides are applied every cycle.
//!
//! The crate is pure `no_std` with no HAL or executor dependency. Hardware lives in
//! the firmware crate, which feeds [`engine::CycleInput`] values in and applies the
//! [`engine::CycleOutput`] values that come back.
//!
//! # Modules
//!
//! - [`config`]: build-time tuning constants
//! - [`clock`]: wraparound-safe millisecond arithmetic
//! - [`frame`]: control frame type and wire decoding
//! - [`debounce`]: time-based button debouncing
//! - [`state`]: drive mode and feature flags
//! - [`kinematics`]: deadbanded mapping from sticks to wheels
//! - [`watchdog`]: link-loss detection
//! - [`battery`]: undervoltage lockout
//! - [`indicator`]: headlight, tail light and turn-signal patterns
//! - [`engine`]: the per-cycle arbitration pipeline

#![no_std]

pub mod battery;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod frame;
pub mod indicator;
pub mod kinematics;
pub mod state;
pub mod watchdog;

pub use engine::{Arbiter, CycleInput, CycleOutput};
