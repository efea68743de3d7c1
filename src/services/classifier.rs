//! Account and transaction classification
//!
//! Turns raw ledger entries into semantic money movements. A transaction is
//! first reduced to a [`Route`] (facts about the account it was posted in and
//! the account on the other side of a transfer, if any), then a single
//! decision tree maps the route and amount to a [`Classification`]. The two
//! consumers of that tree differ only in their leaf outcomes, which are
//! selected by [`Policy`].

use std::collections::HashMap;

use tracing::trace;

use crate::error::{AgeResult, Inconsistency};
use crate::models::{Account, AccountId, AccountType, Money, Transaction, TransactionId};

/// What a transaction means for the money it touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Money became available (amount is positive)
    Income(Money),
    /// Money was spent (amount is positive, sign-normalized)
    Outflow(Money),
    /// Internal movement, or not counted by this policy
    Ignored,
}

impl Classification {
    /// Income for positive amounts, outflow for negative ones
    fn flow(amount: Money) -> Self {
        if amount.is_positive() {
            Self::Income(amount)
        } else if amount.is_negative() {
            Self::Outflow(amount.abs())
        } else {
            Self::Ignored
        }
    }

    fn outflow_only(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Outflow(amount.abs())
        } else {
            Self::Ignored
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income(_))
    }

    pub fn is_outflow(&self) -> bool {
        matches!(self, Self::Outflow(_))
    }

    /// Ledger-signed amount: positive for income, negative for outflow
    pub fn signed_amount(&self) -> Money {
        match self {
            Self::Income(amount) => *amount,
            Self::Outflow(amount) => -*amount,
            Self::Ignored => Money::zero(),
        }
    }
}

/// Which consumer is asking, and therefore which leaves apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Aging: budget spending and the income buckets it draws from.
    /// `scheduled` marks one-sided projected transactions.
    BudgetOutflow { scheduled: bool },
    /// Net worth: anything that enters or leaves the set of accounts
    /// as a whole, with credit spending counted when it is paid off.
    NetWorth,
}

impl Policy {
    pub const HISTORICAL: Policy = Policy::BudgetOutflow { scheduled: false };
    pub const SCHEDULED: Policy = Policy::BudgetOutflow { scheduled: true };
}

/// Classifier-relevant facts about one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Side {
    pub on_budget: bool,
    pub cash_backed: bool,
    pub account_type: AccountType,
}

impl From<&Account> for Side {
    fn from(account: &Account) -> Self {
        Self {
            on_budget: account.on_budget,
            cash_backed: account.is_cash_backed(),
            account_type: account.account_type,
        }
    }
}

/// The account a transaction was posted in, and its transfer counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub source: Side,
    pub target: Option<Side>,
}

/// Classify an amount moving along a route. Total over every input.
pub fn classify(policy: Policy, route: &Route, amount: Money) -> Classification {
    use Classification::{Ignored, Outflow};

    if amount.is_zero() {
        return Ignored;
    }
    let source = &route.source;

    match (source.cash_backed, route.target.as_ref()) {
        // Spending from, or income into, a cash account
        (true, None) => match policy {
            Policy::BudgetOutflow { .. } if !source.on_budget => Ignored,
            _ => Classification::flow(amount),
        },

        (true, Some(target)) => match policy {
            Policy::BudgetOutflow { scheduled } => {
                if !source.on_budget {
                    tracking_into_budget(scheduled, target, amount)
                } else if !target.on_budget {
                    Classification::flow(amount)
                } else if scheduled && !target.cash_backed {
                    // Scheduled card payments only exist on the cash side.
                    Classification::outflow_only(amount)
                } else {
                    // cash <> cash is moving money around; the cash leg of a
                    // card payment is counted on the card side instead
                    Ignored
                }
            }
            Policy::NetWorth => {
                if target.account_type == AccountType::CreditCard && amount.is_negative() {
                    Outflow(amount.abs())
                } else {
                    Ignored
                }
            }
        },

        // Credit purchases are aged when they are paid, not when made
        (false, None) => match policy {
            Policy::BudgetOutflow { .. } => Ignored,
            Policy::NetWorth if source.on_budget && amount.is_negative() => Ignored,
            Policy::NetWorth => Classification::flow(amount),
        },

        (false, Some(target)) => match policy {
            Policy::BudgetOutflow { scheduled } => {
                if !source.on_budget {
                    tracking_into_budget(scheduled, target, amount)
                } else if target.cash_backed && amount.is_positive() {
                    // card payment: settles earlier purchases, dated today
                    Outflow(amount)
                } else {
                    Ignored
                }
            }
            Policy::NetWorth => Ignored,
        },
    }
}

/// A scheduled transfer entered on the tracking side is the only record of
/// money arriving in the budget.
fn tracking_into_budget(scheduled: bool, target: &Side, amount: Money) -> Classification {
    if scheduled && target.on_budget && target.cash_backed && amount.is_negative() {
        Classification::Income(amount.abs())
    } else {
        Classification::Ignored
    }
}

/// Resolves account references for a ledger snapshot
pub struct Classifier<'a> {
    accounts: HashMap<AccountId, &'a Account>,
}

impl<'a> Classifier<'a> {
    /// Index the snapshot's accounts
    pub fn new(accounts: &'a [Account]) -> Self {
        Self {
            accounts: accounts.iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Look up the account a transaction was posted in
    pub fn account(&self, transaction: TransactionId, id: AccountId) -> AgeResult<&'a Account> {
        self.accounts.get(&id).copied().ok_or_else(|| {
            Inconsistency::UnknownAccount {
                transaction,
                account: id,
            }
            .into()
        })
    }

    /// Look up the other side of a transfer, if there is one
    pub fn resolve_transfer(&self, txn: &Transaction) -> AgeResult<Option<&'a Account>> {
        match txn.transfer_account_id {
            None => Ok(None),
            Some(id) => self.accounts.get(&id).copied().map(Some).ok_or_else(|| {
                Inconsistency::UnknownTransferAccount {
                    transaction: txn.id,
                    account: id,
                }
                .into()
            }),
        }
    }

    /// Reduce a transaction to the facts the decision tree needs
    pub fn route(&self, txn: &Transaction) -> AgeResult<Route> {
        let source = self.account(txn.id, txn.account_id)?;
        let target = self.resolve_transfer(txn)?;
        Ok(Route {
            source: source.into(),
            target: target.map(Side::from),
        })
    }

    /// Classify a transaction under a policy
    pub fn classify(&self, policy: Policy, txn: &Transaction) -> AgeResult<Classification> {
        let route = self.route(txn)?;
        let classification = classify(policy, &route, txn.amount);
        trace!(
            id = %txn.id,
            date = %txn.date,
            amount = %txn.amount,
            ?policy,
            ?classification,
            "classified"
        );
        Ok(classification)
    }
}
