//! landrecords - County Land-Record Search
//!
//! Drives a county records portal through a remote browser-automation
//! executor and turns the results table into structured records.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Browser**: Action steps and the search step-sequence builder
//! - **Executor**: Remote executor abstraction with an HTTP backend
//! - **Extract**: Results-table markup to records
//! - **Search**: End-to-end orchestration
//! - **CLI**: Command handlers for the binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use landrecords::{Config, LandRecordSearch, SearchCriteria};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load().unwrap();
//!     let search = LandRecordSearch::from_config(&config).unwrap();
//!
//!     let outcome = search.run(&SearchCriteria::surname("Smith")).await.unwrap();
//!     println!("{}", serde_json::to_string_pretty(outcome.records()).unwrap());
//! }
//! ```

pub mod browser;
pub mod cli;
pub mod core;
pub mod executor;
pub mod extract;
pub mod search;

// Re-export commonly used items
pub use browser::{build_steps, ActionStep, StepSequenceBuilder};
pub use crate::core::{Config, LandRecordsError, Result, ResultRecord, SearchCriteria, StepResult};
pub use executor::{HttpExecutor, StepExecutor};
pub use extract::{extract_records, find_markup, TableExtractor};
pub use search::{LandRecordSearch, SearchOutcome};
