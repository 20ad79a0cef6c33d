//! Extraction module
//!
//! Locates the results markup in executor output and converts the table
//! into records.

mod markup;
mod table;

pub use markup::{find_attribute, find_markup};
pub use table::{extract_records, ExtractedTable, TableExtractor};
