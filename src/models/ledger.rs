//! Ledger snapshot
//!
//! The read-only collections the age-of-money computation runs over: every
//! account, every posted transaction and every scheduled transaction of a
//! single budget.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::scheduled::ScheduledTransaction;
use super::transaction::Transaction;

/// An in-memory snapshot of one budget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub scheduled: Vec<ScheduledTransaction>,
}

impl Ledger {
    /// Build a snapshot, dropping records the source marked as deleted
    pub fn new(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        scheduled: Vec<ScheduledTransaction>,
    ) -> Self {
        Self {
            accounts: accounts.into_iter().filter(|a| !a.deleted).collect(),
            transactions: transactions.into_iter().filter(|t| !t.deleted).collect(),
            scheduled: scheduled.into_iter().filter(|s| !s.deleted).collect(),
        }
    }

    /// Find an account by name (case-insensitive)
    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_new_drops_deleted_records() {
        let checking = Account::new("Checking", AccountType::Checking);
        let mut gone = Account::new("Old", AccountType::Savings);
        gone.deleted = true;

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let kept = Transaction::new(checking.id, date, Money::from_milliunits(1000));
        let mut removed = Transaction::new(checking.id, date, Money::from_milliunits(2000));
        removed.deleted = true;

        let ledger = Ledger::new(vec![checking, gone], vec![kept, removed], vec![]);
        assert_eq!(ledger.accounts.len(), 1);
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.transactions[0].amount, Money::from_milliunits(1000));
    }

    #[test]
    fn test_account_by_name() {
        let ledger = Ledger::new(
            vec![Account::new("Joint Checking", AccountType::Checking)],
            vec![],
            vec![],
        );
        assert!(ledger.account_by_name("joint checking").is_some());
        assert!(ledger.account_by_name("Savings").is_none());
    }
}
