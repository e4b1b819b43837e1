// LogWeave - platform/mod.rs
//
// Platform abstraction layer: filesystem access and config directory resolution.

pub mod config;
pub mod fs;
