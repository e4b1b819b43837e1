// LogWeave - core/mod.rs
//
// Core merge logic.
// Dependencies: standard library and chrono only.
// Must NOT depend on: platform or app, and must not open files itself.

pub mod merge;
pub mod model;
pub mod source;
pub mod timestamp;
