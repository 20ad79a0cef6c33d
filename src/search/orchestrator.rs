//! Search orchestrator
//!
//! Builds the step sequence, submits it to the remote executor, finds the
//! extracted markup among the step results and turns it into records.

use std::sync::Arc;

use crate::browser::{validate_sequence, StepSequenceBuilder};
use crate::core::{Config, Result, ResultRecord, SearchCriteria};
use crate::executor::{HttpExecutor, StepExecutor};
use crate::extract::{find_markup, TableExtractor};

/// What a completed search produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No step result carried results-table markup
    NoResultsTable,
    /// The table was found; may hold zero records
    Records(Vec<ResultRecord>),
}

impl SearchOutcome {
    /// Records found, empty when there was no table
    pub fn records(&self) -> &[ResultRecord] {
        match self {
            SearchOutcome::NoResultsTable => &[],
            SearchOutcome::Records(records) => records,
        }
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        match self {
            SearchOutcome::NoResultsTable => Vec::new(),
            SearchOutcome::Records(records) => records,
        }
    }
}

/// Runs land-record searches against a remote executor
pub struct LandRecordSearch {
    builder: StepSequenceBuilder,
    executor: Arc<dyn StepExecutor>,
}

impl LandRecordSearch {
    /// Create a search against the default portal
    pub fn new(executor: Arc<dyn StepExecutor>) -> Self {
        Self {
            builder: StepSequenceBuilder::new(),
            executor,
        }
    }

    /// Create a search with a custom step builder
    pub fn with_builder(builder: StepSequenceBuilder, executor: Arc<dyn StepExecutor>) -> Self {
        Self { builder, executor }
    }

    /// Create a search from configuration, using the HTTP executor
    pub fn from_config(config: &Config) -> Result<Self> {
        let builder = StepSequenceBuilder::from_config(&config.portal)?;
        let executor = HttpExecutor::from_config(&config.executor)?;
        Ok(Self::with_builder(builder, Arc::new(executor)))
    }

    pub fn builder(&self) -> &StepSequenceBuilder {
        &self.builder
    }

    /// Run one search end to end
    pub async fn run(&self, criteria: &SearchCriteria) -> Result<SearchOutcome> {
        let steps = self.builder.build(criteria)?;
        validate_sequence(&steps)?;

        tracing::info!(
            surname = %criteria.surname,
            given_name = criteria.given_name.as_deref().unwrap_or(""),
            executor = self.executor.name(),
            "starting land-record search"
        );

        let results = self.executor.execute(&steps).await?;

        let Some(markup) = find_markup(&results) else {
            tracing::info!(results = results.len(), "no results table in executor output");
            return Ok(SearchOutcome::NoResultsTable);
        };

        let records = match TableExtractor::new() {
            Ok(extractor) => extractor.extract(&markup),
            Err(e) if e.is_no_records() => {
                tracing::warn!(error = %e, "could not parse results markup, treating as no records");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        tracing::info!(records = records.len(), "search finished");

        Ok(SearchOutcome::Records(records))
    }
}
