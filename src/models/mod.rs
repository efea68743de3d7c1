//! Core data models for age-of-money
//!
//! This module contains the data structures that describe a budget snapshot:
//! accounts, posted transactions, scheduled transactions and money amounts.

pub mod account;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod scheduled;
pub mod transaction;

pub use account::{Account, AccountType};
pub use ids::{AccountId, ScheduledTransactionId, TransactionId};
pub use ledger::Ledger;
pub use money::Money;
pub use scheduled::{Frequency, ScheduledTransaction};
pub use transaction::{ClearedStatus, Transaction};
