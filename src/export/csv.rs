//! CSV Export functionality
//!
//! Exports posted transactions in the column layout of the budgeting app's
//! own register export.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{AgeError, AgeResult};
use crate::models::{Ledger, Money, Transaction};

const HEADER: [&str; 9] = [
    "Account", "Flag", "Date", "Payee", "Category", "Memo", "Outflow", "Inflow", "Cleared",
];

/// Which transactions to export
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only transactions on or after this date
    pub since: Option<NaiveDate>,
    /// Only transactions in this category (exact name)
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(since) = self.since {
            if txn.date < since {
                return false;
            }
        }
        match &self.category {
            Some(category) => txn.category_name.as_deref() == Some(category.as_str()),
            None => true,
        }
    }
}

/// Export matching transactions to CSV, oldest first. Returns the row count.
pub fn export_transactions_csv<W: Write>(
    ledger: &Ledger,
    filter: &TransactionFilter,
    writer: W,
) -> AgeResult<usize> {
    let mut out = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| AgeError::Export(e.to_string());

    out.write_record(HEADER).map_err(export_err)?;

    let mut rows: Vec<&Transaction> = ledger
        .transactions
        .iter()
        .filter(|t| filter.matches(t))
        .collect();
    rows.sort_by_key(|t| t.date);

    for txn in &rows {
        let account_name = if txn.account_name.is_empty() {
            ledger
                .accounts
                .iter()
                .find(|a| a.id == txn.account_id)
                .map(|a| a.name.as_str())
                .unwrap_or_default()
        } else {
            txn.account_name.as_str()
        };
        let (outflow, inflow) = split_amount(txn.amount);
        let date = txn.date.to_string();
        let cleared = txn.cleared.to_string();

        out.write_record([
            account_name,
            txn.flag_color.as_deref().unwrap_or_default(),
            date.as_str(),
            txn.payee_name.as_str(),
            txn.category_name.as_deref().unwrap_or_default(),
            txn.memo.as_str(),
            outflow.as_str(),
            inflow.as_str(),
            cleared.as_str(),
        ])
        .map_err(export_err)?;
    }

    out.flush().map_err(|e| AgeError::Export(e.to_string()))?;
    Ok(rows.len())
}

/// Outflow and inflow columns; only one of them is filled
fn split_amount(amount: Money) -> (String, String) {
    if amount.is_negative() {
        (amount.abs().to_decimal_string(), String::new())
    } else {
        (String::new(), amount.to_decimal_string())
    }
}
