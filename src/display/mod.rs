//! Display formatting for terminal output

pub mod report;

pub use report::{clean_payee, format_date, format_grouped, highlight, truncate};
