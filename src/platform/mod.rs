// TutorFinder - platform/mod.rs
//
// Platform abstraction layer: config directories and data file access.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
