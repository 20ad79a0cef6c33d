//! Results-table extraction
//!
//! Turns the outer markup of the portal's results table into records keyed
//! by column header, using the `scraper` crate for parsing.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::core::{LandRecordsError, Result, ResultRecord};

/// Headers and data rows read from a table, before pairing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    /// Pair each row's cells with the headers by position.
    ///
    /// Pairing stops at whichever side runs out first: short rows give
    /// partial records and cells beyond the last header are dropped.
    pub fn records(&self) -> Vec<ResultRecord> {
        self.rows
            .iter()
            .map(|cells| {
                self.headers
                    .iter()
                    .zip(cells.iter())
                    .map(|(h, c)| (h.as_str(), c.as_str()))
                    .collect::<ResultRecord>()
            })
            .collect()
    }
}

/// Extracts records from a single results table
pub struct TableExtractor {
    table: Selector,
    header_cell: Selector,
    row: Selector,
    data_cell: Selector,
}

impl TableExtractor {
    /// Compile the selectors the extractor needs
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: parse_selector("table")?,
            header_cell: parse_selector("th")?,
            row: parse_selector("tr")?,
            data_cell: parse_selector("td")?,
        })
    }

    /// Read headers and data rows from the first table in the markup.
    ///
    /// The first row is always treated as the header row and skipped, even
    /// when it holds no `th` cells. Rows without any `td` cell are dropped.
    pub fn extract_table(&self, markup: &str) -> Option<ExtractedTable> {
        let fragment = Html::parse_fragment(markup);
        let table = fragment.select(&self.table).next()?;

        let headers: Vec<String> = table.select(&self.header_cell).map(cell_text).collect();

        let rows = table
            .select(&self.row)
            .skip(1)
            .map(|row| row.select(&self.data_cell).map(cell_text).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();

        Some(ExtractedTable { headers, rows })
    }

    /// Extract records; markup without a table yields no records
    pub fn extract(&self, markup: &str) -> Vec<ResultRecord> {
        match self.extract_table(markup) {
            Some(table) => {
                let records = table.records();
                tracing::debug!(
                    headers = table.headers.len(),
                    records = records.len(),
                    "extracted results table"
                );
                records
            }
            None => {
                tracing::debug!(bytes = markup.len(), "no table element in markup");
                Vec::new()
            }
        }
    }
}

/// Extract records from results-table markup in one call
pub fn extract_records(markup: &str) -> Result<Vec<ResultRecord>> {
    Ok(TableExtractor::new()?.extract(markup))
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| LandRecordsError::markup(format!("Invalid selector '{}': {}", css, e)))
}

/// Text of a cell: each text node trimmed, blanks dropped, joined without separator
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(markup: &str) -> Vec<ResultRecord> {
        TableExtractor::new().unwrap().extract(markup)
    }

    #[test]
    fn test_extractor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TableExtractor>();
        assert_send_sync::<ExtractedTable>();
    }

    #[test]
    fn test_single_record() {
        let records = extract(
            "<table><tr><th>Name</th><th>Book</th></tr><tr><td>Smith, John</td><td>123</td></tr></table>",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Name"), Some("Smith, John"));
        assert_eq!(records[0].get("Book"), Some("123"));
        assert_eq!(
            serde_json::to_string(&records).unwrap(),
            r#"[{"Name":"Smith, John","Book":"123"}]"#
        );
    }

    #[test]
    fn test_no_table_is_empty() {
        assert!(extract("").is_empty());
        assert!(extract("<div><p>No matches</p></div>").is_empty());
        assert!(extract("<<<>>> not html at all &&&").is_empty());
    }

    #[test]
    fn test_header_row_only() {
        assert!(extract("<table><tr><th>Name</th><th>Book</th></tr></table>").is_empty());
    }

    #[test]
    fn test_first_row_skipped_without_headers() {
        let records = extract("<table><tr><td>a</td></tr><tr><td>b</td></tr></table>");
        // No th cells means no headers, so the surviving row pairs to nothing
        assert_eq!(records.len(), 1);
        assert!(records[0].is_empty());
    }

    #[test]
    fn test_empty_rows_skipped() {
        let records = extract(
            "<table>\
               <tr><th>Name</th><th>Book</th></tr>\
               <tr><td>Smith</td><td>1</td></tr>\
               <tr></tr>\
               <tr><th>spacer</th></tr>\
               <tr><td>Jones</td><td>2</td></tr>\
             </table>",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some("Smith"));
        assert_eq!(records[1].get("Name"), Some("Jones"));
        assert_eq!(records[1].get("Book"), Some("2"));
    }

    #[test]
    fn test_ragged_rows_truncate() {
        let table = TableExtractor::new()
            .unwrap()
            .extract_table(
                "<table><tr><th>A</th><th>B</th></tr>\
                 <tr><td>1</td></tr>\
                 <tr><td>1</td><td>2</td><td>3</td></tr></table>",
            )
            .unwrap();
        let records = table.records();

        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("A"), Some("1"));
        assert_eq!(records[1].len(), 2);
        assert_eq!(records[1].get("B"), Some("2"));
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_cell_text_normalized() {
        let records = extract(
            "<table><tr><th> Grantor </th><th>Date</th></tr>\
             <tr><td>\n  <a href='#'>SMITH JOHN</a>\n</td><td> 01/02/2003 </td></tr></table>",
        );
        assert_eq!(records[0].get("Grantor"), Some("SMITH JOHN"));
        assert_eq!(records[0].get("Date"), Some("01/02/2003"));
    }

    #[test]
    fn test_duplicate_headers_last_wins() {
        let records = extract(
            "<table><tr><th>Name</th><th>Name</th></tr><tr><td>first</td><td>second</td></tr></table>",
        );
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("Name"), Some("second"));
    }

    #[test]
    fn test_only_first_table_used() {
        let records = extract(
            "<table><tr><th>X</th></tr><tr><td>1</td></tr></table>\
             <table><tr><th>Y</th></tr><tr><td>2</td></tr></table>",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("X"), Some("1"));
    }

    #[test]
    fn test_thead_tbody_layout() {
        let records = extract(
            "<table id='searchResultsTable'>\
               <thead><tr><th>Name</th><th>Type</th></tr></thead>\
               <tbody>\
                 <tr><td>SMITH JOHN</td><td>DEED</td></tr>\
                 <tr><td>SMITH JANE</td><td>LIEN</td></tr>\
               </tbody>\
             </table>",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Type"), Some("LIEN"));
    }
}
