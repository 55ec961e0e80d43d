// TutorFinder - app/mod.rs
//
// Application layer: request orchestration.
// Dependencies: core layer, platform loader.

pub mod search;
