//! Browser automation module
//!
//! Describes portal interactions as data for the remote executor to run.

mod builder;
mod steps;

pub use builder::{build_steps, StepSequenceBuilder};
pub use steps::{validate_sequence, ActionStep, MarkupAttribute};
