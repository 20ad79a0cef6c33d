//! CLI commands
//!
//! Each command returns the text to print on stdout.

use std::fs;
use std::path::Path;

use crate::browser::StepSequenceBuilder;
use crate::core::{Config, LandRecordsError, Result, ResultRecord, SearchCriteria};
use crate::extract::TableExtractor;
use crate::search::{LandRecordSearch, SearchOutcome};

/// Printed when the executor output held no results-table markup
pub const NO_TABLE_MESSAGE: &str = "No results table found in output.";

/// Printed when the table was found but had no data rows
pub const NO_RECORDS_MESSAGE: &str = "No matching records.";

/// What a command wants printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// JSON for stdout
    Json(String),
    /// A human-readable notice
    Notice(&'static str),
}

/// Render the step sequence for a search without running it
pub fn plan(config: &Config, criteria: &SearchCriteria) -> Result<CommandOutput> {
    let builder = StepSequenceBuilder::from_config(&config.portal)?;
    let steps = builder.build(criteria)?;

    for (i, step) in steps.iter().enumerate() {
        tracing::debug!("step {}: {}", i + 1, step);
    }

    Ok(CommandOutput::Json(to_json(&steps, config.output.pretty)?))
}

/// Extract records from a saved copy of the results table
pub fn parse_file(config: &Config, path: &Path) -> Result<CommandOutput> {
    let markup = fs::read_to_string(path).map_err(|e| {
        LandRecordsError::Other(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let records = match TableExtractor::new() {
        Ok(extractor) => extractor.extract(&markup),
        Err(e) if e.is_no_records() => {
            tracing::warn!(error = %e, "could not parse markup, treating as no records");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    records_output(&records, config.output.pretty)
}

/// Run a search through the configured executor
pub async fn search(config: &Config, criteria: &SearchCriteria) -> Result<CommandOutput> {
    config.validate()?;
    let search = LandRecordSearch::from_config(config)?;

    match search.run(criteria).await? {
        SearchOutcome::NoResultsTable => Ok(CommandOutput::Notice(NO_TABLE_MESSAGE)),
        SearchOutcome::Records(records) => records_output(&records, config.output.pretty),
    }
}

fn records_output(records: &[ResultRecord], pretty: bool) -> Result<CommandOutput> {
    if records.is_empty() {
        return Ok(CommandOutput::Notice(NO_RECORDS_MESSAGE));
    }
    Ok(CommandOutput::Json(to_json(records, pretty)?))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
