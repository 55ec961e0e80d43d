// TutorFinder - core/mod.rs
//
// Core business logic layer.
// Dependencies: regex, serde, csv/serde_json writers.
// Must NOT depend on: ui, platform, app, or read from disk.

pub mod export;
pub mod filter;
pub mod grades;
pub mod model;
