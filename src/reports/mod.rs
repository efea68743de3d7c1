//! Reports module for age-of-money
//!
//! Provides the age of money report and the largest inflows/outflows report.

pub mod age_of_money;
pub mod flows;

pub use age_of_money::AgeOfMoneyReport;
pub use flows::{FlowEntry, FlowFilter, FlowPeriod, FlowsReport, ListingRule};
