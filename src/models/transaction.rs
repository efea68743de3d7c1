//! Transaction model
//!
//! Represents posted ledger transactions, including the one-sided view of a
//! transfer (each leg of a transfer is its own transaction pointing at the
//! other account).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Cleared status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    #[default]
    Uncleared,
    Cleared,
    Reconciled,
}

impl fmt::Display for ClearedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncleared => write!(f, "uncleared"),
            Self::Cleared => write!(f, "cleared"),
            Self::Reconciled => write!(f, "reconciled"),
        }
    }
}

/// A posted transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Account name (stored for display)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub account_name: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub payee_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub memo: String,

    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub cleared: ClearedStatus,

    #[serde(default)]
    pub flag_color: Option<String>,

    /// If this is a transfer, the account on the other side
    #[serde(default)]
    pub transfer_account_id: Option<AccountId>,

    #[serde(default)]
    pub deleted: bool,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(account_id: AccountId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            account_name: String::new(),
            date,
            amount,
            payee_name: String::new(),
            memo: String::new(),
            category_name: None,
            cleared: ClearedStatus::Uncleared,
            flag_color: None,
            transfer_account_id: None,
            deleted: false,
        }
    }

    /// Create a transfer leg pointing at another account
    pub fn transfer(
        account_id: AccountId,
        transfer_account_id: AccountId,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        let mut txn = Self::new(account_id, date, amount);
        txn.transfer_account_id = Some(transfer_account_id);
        txn
    }

    /// Set the display names carried by the snapshot
    pub fn named(mut self, account_name: impl Into<String>, payee_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self.payee_name = payee_name.into();
        self
    }

    /// Check if this is a transfer
    pub fn is_transfer(&self) -> bool {
        self.transfer_account_id.is_some()
    }
}

/// Treat a JSON `null` string as empty
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
