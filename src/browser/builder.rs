//! Step sequence builder for the records portal search
//!
//! Produces the fixed guest-login, open-search, fill, submit, extract flow.
//! Every wait gates the interaction that follows it, since the portal loads
//! each page asynchronously.

use crate::browser::steps::{ActionStep, MarkupAttribute};
use crate::core::config::{PortalConfig, DEFAULT_PORTAL_URL, DEFAULT_WAIT_TIMEOUT_MS};
use crate::core::{LandRecordsError, Result, SearchCriteria};

const GUEST_LOGIN: &str = "input[value='Guest Login']";
const SEARCH_RECORDS_LINK: &str = "a:has-text('Search Records')";
const SEARCH_TABS: &str = "#SearchTabs";
const LAST_NAME_INPUT: &str = "input[name='LastName']";
const FIRST_NAME_INPUT: &str = "input[name='FirstName']";
const SEARCH_BUTTON: &str = "input[type='button'][value='Search']";
const RESULTS_TABLE: &str = "#searchResultsTable";

/// Builds the action sequence for one name search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequenceBuilder {
    portal_url: String,
    wait_timeout_ms: u64,
}

impl StepSequenceBuilder {
    /// Builder targeting the default portal with 10 s waits
    pub fn new() -> Self {
        Self {
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }

    /// Builder using configured portal settings
    pub fn from_config(portal: &PortalConfig) -> Result<Self> {
        portal.validate()?;
        Ok(Self {
            portal_url: portal.url.clone(),
            wait_timeout_ms: portal.wait_timeout_ms,
        })
    }

    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    pub fn wait_timeout_ms(&self) -> u64 {
        self.wait_timeout_ms
    }

    /// Build the steps for a search.
    ///
    /// Returns 9 steps for a surname-only search and 10 when a given name
    /// is supplied. The last step is always the results-table extract.
    pub fn build(&self, criteria: &SearchCriteria) -> Result<Vec<ActionStep>> {
        if criteria.surname.trim().is_empty() {
            return Err(LandRecordsError::invalid_input("Surname must not be empty"));
        }
        if let Some(given) = &criteria.given_name {
            if given.trim().is_empty() {
                return Err(LandRecordsError::invalid_input(
                    "Given name must not be empty when supplied",
                ));
            }
        }

        let wait = self.wait_timeout_ms;
        let mut steps = vec![
            ActionStep::navigate(&self.portal_url),
            ActionStep::wait_for(GUEST_LOGIN, wait),
            ActionStep::click(GUEST_LOGIN),
            ActionStep::wait_for(SEARCH_RECORDS_LINK, wait),
            ActionStep::click(SEARCH_RECORDS_LINK),
            ActionStep::wait_for(SEARCH_TABS, wait),
            ActionStep::fill(LAST_NAME_INPUT, &criteria.surname),
        ];

        if let Some(given) = &criteria.given_name {
            steps.push(ActionStep::fill(FIRST_NAME_INPUT, given));
        }

        steps.extend([
            ActionStep::click(SEARCH_BUTTON),
            ActionStep::wait_for(RESULTS_TABLE, wait),
            ActionStep::extract(RESULTS_TABLE, MarkupAttribute::OuterHtml),
        ]);

        tracing::debug!(
            steps = steps.len(),
            given_name = criteria.given_name.is_some(),
            "built search step sequence"
        );

        Ok(steps)
    }
}

impl Default for StepSequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default-portal step sequence for a search
pub fn build_steps(criteria: &SearchCriteria) -> Result<Vec<ActionStep>> {
    StepSequenceBuilder::new().build(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::steps::validate_sequence;

    #[test]
    fn test_surname_only_has_nine_steps() {
        let steps = build_steps(&SearchCriteria::surname("Smith")).unwrap();
        assert_eq!(steps.len(), 9);
        assert_eq!(steps[0], ActionStep::navigate(DEFAULT_PORTAL_URL));
        assert_eq!(steps[6], ActionStep::fill(LAST_NAME_INPUT, "Smith"));
        assert_eq!(
            steps.last(),
            Some(&ActionStep::extract(RESULTS_TABLE, MarkupAttribute::OuterHtml))
        );
        assert!(validate_sequence(&steps).is_ok());
    }

    #[test]
    fn test_given_name_follows_surname() {
        let steps = build_steps(&SearchCriteria::full_name("Smith", "John")).unwrap();
        assert_eq!(steps.len(), 10);
        assert_eq!(steps[6], ActionStep::fill(LAST_NAME_INPUT, "Smith"));
        assert_eq!(steps[7], ActionStep::fill(FIRST_NAME_INPUT, "John"));
        assert_eq!(steps[8], ActionStep::click(SEARCH_BUTTON));
        assert!(validate_sequence(&steps).is_ok());
    }

    #[test]
    fn test_build_is_deterministic() {
        let criteria = SearchCriteria::full_name("Jones", "Mary");
        let builder = StepSequenceBuilder::new();
        assert_eq!(builder.build(&criteria).unwrap(), builder.build(&criteria).unwrap());
    }

    #[test]
    fn test_waits_gate_their_interaction() {
        let steps = build_steps(&SearchCriteria::full_name("Smith", "John")).unwrap();
        for (i, step) in steps.iter().enumerate() {
            if let ActionStep::WaitForElement { selector, .. } = step {
                let gated = steps[i + 1..]
                    .iter()
                    .find(|s| !matches!(s, ActionStep::FillField { .. }))
                    .expect("wait must not be the last step");
                match gated {
                    ActionStep::Click { selector: s } | ActionStep::ExtractMarkup { selector: s, .. } => {
                        // The search-tabs wait gates the form, not the submit button itself
                        if selector != SEARCH_TABS {
                            assert_eq!(s, selector);
                        }
                    }
                    other => panic!("wait followed by {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_empty_surname_rejected() {
        assert!(matches!(
            build_steps(&SearchCriteria::surname("")),
            Err(LandRecordsError::InvalidInput(_))
        ));
        assert!(matches!(
            build_steps(&SearchCriteria::surname("   ")),
            Err(LandRecordsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_given_name_rejected() {
        assert!(matches!(
            build_steps(&SearchCriteria::full_name("Smith", "")),
            Err(LandRecordsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_config_overrides_portal() {
        let portal = PortalConfig {
            url: "https://records.example.gov/".to_string(),
            wait_timeout_ms: 2_500,
        };
        let builder = StepSequenceBuilder::from_config(&portal).unwrap();
        let steps = builder.build(&SearchCriteria::surname("Smith")).unwrap();

        assert_eq!(steps[0], ActionStep::navigate("https://records.example.gov/"));
        assert_eq!(steps[1], ActionStep::wait_for(GUEST_LOGIN, 2_500));
    }

    #[test]
    fn test_from_config_rejects_zero_timeout() {
        let portal = PortalConfig {
            url: DEFAULT_PORTAL_URL.to_string(),
            wait_timeout_ms: 0,
        };
        assert!(StepSequenceBuilder::from_config(&portal).is_err());
    }
}
