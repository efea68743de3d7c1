//! Export module for age-of-money
//!
//! - CSV: posted transactions, spreadsheet-compatible
//! - JSON: the age of money report as a versioned document
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_transactions_csv, TransactionFilter};
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
