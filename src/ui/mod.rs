// TutorFinder - ui/mod.rs
//
// Terminal presentation layer.
// Dependencies: core layer (model), platform config types.

pub mod table;
