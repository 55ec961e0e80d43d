// TutorFinder - lib.rs
//
// Library entry point, exposing grade normalisation, record filtering,
// loading and export for integration testing and programmatic use.
//
// CLI argument handling lives in `main.rs` and is not part of the
// library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
