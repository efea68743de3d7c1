//! Scheduled transaction model
//!
//! A scheduled transaction is a predicted future transaction that has not
//! been posted yet. Scheduled transfers only exist on the side they were
//! entered on; there is no mirror record in the other account.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, ScheduledTransactionId, TransactionId};
use super::money::Money;
use super::transaction::{null_as_empty, Transaction};

/// How often a scheduled transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Frequency {
    #[default]
    Never,
    Daily,
    Weekly,
    EveryOtherWeek,
    TwiceAMonth,
    Every4Weeks,
    Monthly,
    EveryOtherMonth,
    Every3Months,
    Every4Months,
    TwiceAYear,
    Yearly,
    EveryOtherYear,
    #[serde(other)]
    Other,
}

/// A scheduled (not yet posted) transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTransaction {
    pub id: ScheduledTransactionId,

    pub account_id: AccountId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub account_name: String,

    pub date_first: NaiveDate,

    /// Next date this transaction is expected to post
    pub date_next: NaiveDate,

    #[serde(default)]
    pub frequency: Frequency,

    pub amount: Money,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub payee_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub memo: String,

    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub transfer_account_id: Option<AccountId>,

    #[serde(default)]
    pub deleted: bool,
}

impl ScheduledTransaction {
    /// Create a one-off scheduled transaction
    pub fn new(account_id: AccountId, date_next: NaiveDate, amount: Money) -> Self {
        Self {
            id: ScheduledTransactionId::new(),
            account_id,
            account_name: String::new(),
            date_first: date_next,
            date_next,
            frequency: Frequency::Never,
            amount,
            payee_name: String::new(),
            memo: String::new(),
            category_name: None,
            transfer_account_id: None,
            deleted: false,
        }
    }

    /// Create a scheduled transfer leg
    pub fn transfer(
        account_id: AccountId,
        transfer_account_id: AccountId,
        date_next: NaiveDate,
        amount: Money,
    ) -> Self {
        let mut scheduled = Self::new(account_id, date_next, amount);
        scheduled.transfer_account_id = Some(transfer_account_id);
        scheduled
    }

    /// Set the display names carried by the snapshot
    pub fn named(mut self, account_name: impl Into<String>, payee_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self.payee_name = payee_name.into();
        self
    }

    /// The transaction this schedule will post next, dated `date_next`
    pub fn next_occurrence(&self) -> Transaction {
        Transaction {
            id: TransactionId::from(*self.id.as_uuid()),
            account_id: self.account_id,
            account_name: self.account_name.clone(),
            date: self.date_next,
            amount: self.amount,
            payee_name: self.payee_name.clone(),
            memo: self.memo.clone(),
            category_name: self.category_name.clone(),
            cleared: Default::default(),
            flag_color: None,
            transfer_account_id: self.transfer_account_id,
            deleted: self.deleted,
        }
    }
}
