//! Remote executor trait
//!
//! Abstracts the service that runs step sequences in a real browser.

use async_trait::async_trait;

use crate::browser::ActionStep;
use crate::core::{Result, StepResult};

/// Trait for remote browser executors
#[async_trait]
pub trait StepExecutor: Send + Sync {
    /// Run a step sequence and report one result per executed step
    async fn execute(&self, steps: &[ActionStep]) -> Result<Vec<StepResult>>;

    /// Get the executor name
    fn name(&self) -> &str;
}
