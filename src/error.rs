//! Custom error types for age-of-money
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{AccountId, Money, TransactionId};

/// The main error type for age-of-money operations
#[derive(Error, Debug)]
pub enum AgeError {
    /// The ledger snapshot is internally broken; no partial result is safe
    #[error("Data inconsistency: {0}")]
    DataInconsistency(#[from] Inconsistency),

    /// Nothing in the ledger ever counted as income
    #[error("Can't compute age of money without any income")]
    NoIncome,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Snapshot storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

/// Ways a ledger snapshot can contradict itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    #[error("transaction {transaction} references unknown account {account}")]
    UnknownAccount {
        transaction: TransactionId,
        account: AccountId,
    },

    #[error("transaction {transaction} transfers to unknown account {account}")]
    UnknownTransferAccount {
        transaction: TransactionId,
        account: AccountId,
    },

    #[error("spending on {date} exceeds everything ever earned by {shortfall}")]
    Overspent { date: NaiveDate, shortfall: Money },
}

impl AgeError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this error means the snapshot itself is broken
    pub fn is_data_inconsistency(&self) -> bool {
        matches!(self, Self::DataInconsistency(_))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for AgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for age-of-money operations
pub type AgeResult<T> = Result<T, AgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgeError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = AgeError::budget_not_found("Household");
        assert_eq!(err.to_string(), "Budget not found: Household");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_overspent_display() {
        let err: AgeError = Inconsistency::Overspent {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            shortfall: Money::from_milliunits(12_500),
        }
        .into();
        assert!(err.is_data_inconsistency());
        assert_eq!(
            err.to_string(),
            "Data inconsistency: spending on 2024-03-01 exceeds everything ever earned by $12.50"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AgeError = io_err.into();
        assert!(matches!(err, AgeError::Io(_)));
    }
}
