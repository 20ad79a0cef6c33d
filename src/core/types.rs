//! Shared types used across landrecords modules
//!
//! Contains search criteria, executor step results, and extracted records.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Name to search the portal's grantor/grantee index for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Last name, required
    pub surname: String,
    /// First name, optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
}

impl SearchCriteria {
    /// Search by surname only
    pub fn surname(surname: impl Into<String>) -> Self {
        Self {
            surname: surname.into(),
            given_name: None,
        }
    }

    /// Search by surname and given name
    pub fn full_name(surname: impl Into<String>, given_name: impl Into<String>) -> Self {
        Self {
            surname: surname.into(),
            given_name: Some(given_name.into()),
        }
    }
}

/// Outcome of a single step, as reported by the remote executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Position of the step in the submitted sequence
    pub step_index: usize,
    /// Opaque payload, usually serialized JSON
    #[serde(default)]
    pub output: Option<String>,
}

impl StepResult {
    /// A step that produced no output
    pub fn empty(step_index: usize) -> Self {
        Self {
            step_index,
            output: None,
        }
    }

    /// A step that produced a payload
    pub fn with_output(step_index: usize, output: impl Into<String>) -> Self {
        Self {
            step_index,
            output: Some(output.into()),
        }
    }
}

/// One row of the results table, keyed by column header.
///
/// Keys are unique and keep the order they were first inserted in.
/// Re-inserting a key overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRecord {
    fields: Vec<(String, String)>,
}

impl ResultRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; a repeated header keeps its position and takes the new value
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == header) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Get a cell by header
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == header)
            .map(|(_, v)| v.as_str())
    }

    /// Headers in order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Header/value pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ResultRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = ResultRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_header_last_value_wins() {
        let record: ResultRecord = [("Name", "a"), ("Book", "1"), ("Name", "b")]
            .into_iter()
            .collect();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Name"), Some("b"));
        assert_eq!(record.headers().collect::<Vec<_>>(), vec!["Name", "Book"]);
    }

    #[test]
    fn test_record_serializes_in_header_order() {
        let record: ResultRecord = [("Zeta", "1"), ("Alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Zeta":"1","Alpha":"2"}"#);
    }

    #[test]
    fn test_criteria_constructors() {
        assert_eq!(SearchCriteria::surname("Smith").given_name, None);
        assert_eq!(
            SearchCriteria::full_name("Smith", "John").given_name.as_deref(),
            Some("John")
        );
    }
}
