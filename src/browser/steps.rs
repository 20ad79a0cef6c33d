//! Action steps submitted to the remote browser executor
//!
//! Each step serializes as a single-key object, e.g.
//! `{"wait_for_selector": {"selector": "#SearchTabs", "timeout": 10000}}`.

use serde::{Deserialize, Serialize};

use crate::core::{LandRecordsError, Result};

/// Which representation of an element an extract step returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupAttribute {
    /// The element's own markup, tags included
    OuterHtml,
    /// Markup of the element's children
    InnerHtml,
    /// Text content only
    Text,
}

impl MarkupAttribute {
    /// Key the executor uses for this attribute in a step's output payload
    pub fn as_key(&self) -> &'static str {
        match self {
            MarkupAttribute::OuterHtml => "outer_html",
            MarkupAttribute::InnerHtml => "inner_html",
            MarkupAttribute::Text => "text",
        }
    }
}

impl std::fmt::Display for MarkupAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// One browser instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStep {
    /// Load a URL
    #[serde(rename = "goto")]
    Navigate { url: String },

    /// Block until an element matching the selector exists
    #[serde(rename = "wait_for_selector")]
    WaitForElement {
        selector: String,
        #[serde(rename = "timeout")]
        timeout_millis: u64,
    },

    /// Click the first matching element
    Click { selector: String },

    /// Type text into an input
    #[serde(rename = "fill")]
    FillField { selector: String, text: String },

    /// Return markup of the first matching element
    #[serde(rename = "extract")]
    ExtractMarkup {
        selector: String,
        attribute: MarkupAttribute,
    },
}

impl ActionStep {
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::Navigate { url: url.into() }
    }

    pub fn wait_for(selector: impl Into<String>, timeout_millis: u64) -> Self {
        Self::WaitForElement {
            selector: selector.into(),
            timeout_millis,
        }
    }

    pub fn click(selector: impl Into<String>) -> Self {
        Self::Click {
            selector: selector.into(),
        }
    }

    pub fn fill(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self::FillField {
            selector: selector.into(),
            text: text.into(),
        }
    }

    pub fn extract(selector: impl Into<String>, attribute: MarkupAttribute) -> Self {
        Self::ExtractMarkup {
            selector: selector.into(),
            attribute,
        }
    }

    /// Wire name of the step
    pub fn kind(&self) -> &'static str {
        match self {
            ActionStep::Navigate { .. } => "goto",
            ActionStep::WaitForElement { .. } => "wait_for_selector",
            ActionStep::Click { .. } => "click",
            ActionStep::FillField { .. } => "fill",
            ActionStep::ExtractMarkup { .. } => "extract",
        }
    }

    /// Selector the step targets, if any
    pub fn selector(&self) -> Option<&str> {
        match self {
            ActionStep::Navigate { .. } => None,
            ActionStep::WaitForElement { selector, .. }
            | ActionStep::Click { selector }
            | ActionStep::FillField { selector, .. }
            | ActionStep::ExtractMarkup { selector, .. } => Some(selector),
        }
    }

    pub fn is_wait(&self) -> bool {
        matches!(self, ActionStep::WaitForElement { .. })
    }

    pub fn is_extract(&self) -> bool {
        matches!(self, ActionStep::ExtractMarkup { .. })
    }
}

impl std::fmt::Display for ActionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStep::Navigate { url } => write!(f, "goto {}", url),
            ActionStep::WaitForElement {
                selector,
                timeout_millis,
            } => write!(f, "wait for {} ({} ms)", selector, timeout_millis),
            ActionStep::Click { selector } => write!(f, "click {}", selector),
            ActionStep::FillField { selector, text } => {
                write!(f, "fill {} with '{}'", selector, text)
            }
            ActionStep::ExtractMarkup {
                selector,
                attribute,
            } => write!(f, "extract {} of {}", attribute, selector),
        }
    }
}

/// Check the invariants every submitted sequence must hold.
///
/// The sequence is non-empty, selectors are non-empty, timeouts are
/// positive, and exactly one extract step exists as the final step.
pub fn validate_sequence(steps: &[ActionStep]) -> Result<()> {
    let last = steps
        .last()
        .ok_or_else(|| LandRecordsError::invalid_input("Step sequence is empty"))?;

    for (i, step) in steps.iter().enumerate() {
        if let Some(selector) = step.selector() {
            if selector.trim().is_empty() {
                return Err(LandRecordsError::invalid_input(format!(
                    "Step {} ({}) has an empty selector",
                    i,
                    step.kind()
                )));
            }
        }

        if let ActionStep::WaitForElement { timeout_millis, .. } = step {
            if *timeout_millis == 0 {
                return Err(LandRecordsError::invalid_input(format!(
                    "Step {} waits with a zero timeout",
                    i
                )));
            }
        }
    }

    if !last.is_extract() {
        return Err(LandRecordsError::invalid_input(
            "Step sequence must end with an extract step",
        ));
    }

    let extracts = steps.iter().filter(|s| s.is_extract()).count();
    if extracts != 1 {
        return Err(LandRecordsError::invalid_input(format!(
            "Step sequence has {} extract steps, expected 1",
            extracts
        )));
    }

    Ok(())
}
