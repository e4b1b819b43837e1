// LogWeave - app/mod.rs
//
// Application layer: wires platform I/O to the core merge.

pub mod run;
