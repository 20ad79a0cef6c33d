//! Search module - end-to-end land-record lookups
//!
//! Coordinates the step builder, the remote executor, and the extractor.

pub mod orchestrator;

pub use orchestrator::{LandRecordSearch, SearchOutcome};
