//! Shared system plumbing for the rover firmware
pub mod link;
pub mod resources;
