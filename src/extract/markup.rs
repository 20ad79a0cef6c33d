//! Locating the extracted markup among executor step results

use crate::browser::MarkupAttribute;
use crate::core::StepResult;

/// Find the results-table markup in a run's step results.
///
/// Results are scanned in order; the first whose output is a JSON object
/// carrying an `outer_html` key decides the outcome. Outputs that are not
/// JSON are skipped. An empty value means the table was not found.
pub fn find_markup(results: &[StepResult]) -> Option<String> {
    find_attribute(results, MarkupAttribute::OuterHtml)
}

/// Same as [`find_markup`] for any extract attribute
pub fn find_attribute(results: &[StepResult], attribute: MarkupAttribute) -> Option<String> {
    let key = attribute.as_key();

    results
        .iter()
        .filter_map(|r| r.output.as_deref())
        .filter(|output| !output.is_empty())
        .filter_map(|output| serde_json::from_str::<serde_json::Value>(output).ok())
        .find_map(|value| {
            value
                .as_object()
                .and_then(|obj| obj.get(key))
                .map(|v| v.as_str().unwrap_or_default().to_string())
        })
        .filter(|markup| !markup.is_empty())
}
