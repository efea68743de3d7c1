//! Age of money computation
//!
//! Builds income buckets from posted transactions, matches every budget
//! outflow against them in FIFO order, lists the thresholds ahead of the
//! cursor, and optionally projects scheduled transactions onto the same queue.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AgeError, AgeResult, Inconsistency};
use crate::models::{Ledger, Money, Transaction};

use super::allocator::{
    age_in_days, sort_spending, Bucket, Consumption, FifoAllocator, SpendingEvent, Threshold,
    ThresholdLimits,
};
use super::classifier::{Classification, Classifier, Policy};

/// Knobs for one computation
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeOptions {
    /// Scheduled income becomes future buckets during projection
    pub include_scheduled_income: bool,
    pub limits: ThresholdLimits,
}

/// A posted spend matched to the bucket that funded it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealizedSpend {
    pub age_days: i64,
    pub earned: NaiveDate,
    pub spent: NaiveDate,
    pub amount: Money,
    pub account_name: String,
    pub payee_name: String,
}

/// Age of a scheduled spend, if the queue can fund it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectedAge {
    Aged { age_days: i64, earned: NaiveDate },
    NotEarnedYet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedSpend {
    pub age: ProjectedAge,
    pub spend_date: NaiveDate,
    pub amount: Money,
    pub account_name: String,
    pub payee_name: String,
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct AgeOfMoney {
    pub realized: Vec<RealizedSpend>,
    pub thresholds: Vec<Threshold>,
    pub projected: Vec<ProjectedSpend>,
    pub total_earned: Money,
    pub total_spent: Money,
    /// Unspent money after history (before projection)
    pub unspent: Money,
}

impl AgeOfMoney {
    /// Age of the most recent posted spend
    pub fn latest_age(&self) -> Option<i64> {
        self.realized.last().map(|r| r.age_days)
    }

    /// Mean age of the last `count` posted spends, rounded to whole days
    pub fn recent_average_age(&self, count: usize) -> Option<i64> {
        let start = self.realized.len().saturating_sub(count);
        let recent = &self.realized[start..];
        if recent.is_empty() {
            return None;
        }
        let total: i64 = recent.iter().map(|r| r.age_days).sum();
        let n = recent.len() as i64;
        Some((2 * total + n).div_euclid(2 * n))
    }
}

/// Service for age of money over a ledger snapshot
pub struct AgeOfMoneyService<'a> {
    ledger: &'a Ledger,
    classifier: Classifier<'a>,
    options: AgeOptions,
}

impl<'a> AgeOfMoneyService<'a> {
    /// Create a new service with default options
    pub fn new(ledger: &'a Ledger) -> Self {
        Self::with_options(ledger, AgeOptions::default())
    }

    pub fn with_options(ledger: &'a Ledger, options: AgeOptions) -> Self {
        Self {
            ledger,
            classifier: Classifier::new(&ledger.accounts),
            options,
        }
    }

    /// Every posted transaction that counts as income, as an unsorted bucket list
    pub fn build_buckets(&self) -> AgeResult<Vec<Bucket>> {
        let mut buckets = Vec::new();
        for txn in &self.ledger.transactions {
            if let Classification::Income(amount) = self.classifier.classify(Policy::HISTORICAL, txn)? {
                let bucket = Bucket::new(amount, txn.date)
                    .labelled(self.account_name(txn)?, txn.payee_name.as_str());
                debug!(
                    date = %bucket.date,
                    amount = %bucket.amount,
                    account = %bucket.account_name,
                    payee = %bucket.payee_name,
                    "income"
                );
                buckets.push(bucket);
            }
        }
        Ok(buckets)
    }

    /// Every posted budget outflow, oldest first
    pub fn outflows(&self) -> AgeResult<Vec<SpendingEvent>> {
        let mut events = Vec::new();
        for txn in &self.ledger.transactions {
            if let Classification::Outflow(amount) = self.classifier.classify(Policy::HISTORICAL, txn)? {
                events.push(
                    SpendingEvent::new(amount, txn.date)
                        .labelled(self.account_name(txn)?, txn.payee_name.as_str()),
                );
            }
        }
        sort_spending(&mut events);
        Ok(events)
    }

    /// Run history, thresholds and projection
    pub fn compute(&self, as_of: NaiveDateTime) -> AgeResult<AgeOfMoney> {
        for account in &self.ledger.accounts {
            debug!(
                id = %account.id,
                name = %account.name,
                kind = %account.account_type,
                on_budget = account.on_budget,
                "account"
            );
        }

        let buckets = self.build_buckets()?;
        if buckets.is_empty() {
            return Err(AgeError::NoIncome);
        }
        let total_earned: Money = buckets.iter().map(|b| b.amount).sum();
        let spending = self.outflows()?;
        let total_spent: Money = spending.iter().map(|s| s.amount).sum();
        debug!(difference = %(total_earned - total_spent), "budget difference");

        let mut fifo = FifoAllocator::new(buckets);
        let realized = Self::match_history(&mut fifo, spending)?;
        let unspent = fifo.remaining_capacity();
        let thresholds = fifo.thresholds(as_of, self.options.limits);
        let projected = self.project(&mut fifo)?;

        info!(
            realized = realized.len(),
            thresholds = thresholds.len(),
            projected = projected.len(),
            "age of money computed"
        );

        Ok(AgeOfMoney {
            realized,
            thresholds,
            projected,
            total_earned,
            total_spent,
            unspent,
        })
    }

    fn match_history(
        fifo: &mut FifoAllocator,
        spending: Vec<SpendingEvent>,
    ) -> AgeResult<Vec<RealizedSpend>> {
        let mut realized = Vec::with_capacity(spending.len());
        for spend in spending {
            match fifo.consume(spend.amount)? {
                Consumption::Drawn { earned } => realized.push(RealizedSpend {
                    age_days: age_in_days(earned, spend.date),
                    earned,
                    spent: spend.date,
                    amount: spend.amount,
                    account_name: spend.account_name,
                    payee_name: spend.payee_name,
                }),
                Consumption::Exhausted { shortfall } => {
                    return Err(Inconsistency::Overspent {
                        date: spend.date,
                        shortfall,
                    }
                    .into());
                }
            }
        }
        Ok(realized)
    }

    /// Continue the queue through scheduled transactions.
    ///
    /// Stops after the first spend the queue cannot fund.
    pub fn project(&self, fifo: &mut FifoAllocator) -> AgeResult<Vec<ProjectedSpend>> {
        let mut upcoming: Vec<Transaction> = self
            .ledger
            .scheduled
            .iter()
            .map(|s| s.next_occurrence())
            .collect();
        // same day: income before spending, smaller spends first
        upcoming.sort_by(|a, b| a.date.cmp(&b.date).then(b.amount.cmp(&a.amount)));

        let mut projected = Vec::new();
        for txn in &upcoming {
            match self.classifier.classify(Policy::SCHEDULED, txn)? {
                Classification::Outflow(amount) => {
                    let age = match fifo.consume(amount)? {
                        Consumption::Drawn { earned } => ProjectedAge::Aged {
                            age_days: age_in_days(earned, txn.date),
                            earned,
                        },
                        Consumption::Exhausted { shortfall } => {
                            debug!(date = %txn.date, %shortfall, "scheduled spend not earned yet");
                            ProjectedAge::NotEarnedYet
                        }
                    };
                    projected.push(ProjectedSpend {
                        age,
                        spend_date: txn.date,
                        amount,
                        account_name: self.account_name(txn)?,
                        payee_name: txn.payee_name.clone(),
                    });
                    if age == ProjectedAge::NotEarnedYet {
                        break;
                    }
                }
                Classification::Income(amount) if self.options.include_scheduled_income => {
                    fifo.push_bucket(
                        Bucket::new(amount, txn.date)
                            .labelled(self.account_name(txn)?, txn.payee_name.as_str()),
                    );
                }
                _ => {}
            }
        }
        Ok(projected)
    }

    fn account_name(&self, txn: &Transaction) -> AgeResult<String> {
        if !txn.account_name.is_empty() {
            return Ok(txn.account_name.clone());
        }
        Ok(self.classifier.account(txn.id, txn.account_id)?.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, ScheduledTransaction};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn m(milliunits: i64) -> Money {
        Money::from_milliunits(milliunits)
    }

    fn as_of() -> NaiveDateTime {
        d(2024, 3, 1).and_hms_opt(12, 0, 0).unwrap()
    }

    struct Fixture {
        checking: Account,
        card: Account,
        brokerage: Account,
    }

    fn fixture() -> Fixture {
        Fixture {
            checking: Account::new("Checking", AccountType::Checking),
            card: Account::new("Visa", AccountType::CreditCard),
            brokerage: Account::tracking("Brokerage", AccountType::OtherAsset),
        }
    }

    impl Fixture {
        fn accounts(&self) -> Vec<Account> {
            vec![self.checking.clone(), self.card.clone(), self.brokerage.clone()]
        }
    }

    #[test]
    fn test_realized_ages() {
        let f = fixture();
        let transactions = vec![
            Transaction::new(f.checking.id, d(2024, 1, 5), m(50_000)).named("Checking", "Employer"),
            Transaction::new(f.checking.id, d(2024, 1, 1), m(50_000)).named("Checking", "Employer"),
            Transaction::new(f.checking.id, d(2024, 1, 10), m(-70_000)).named("Checking", "Rent"),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, vec![]);

        let result = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap();
        assert_eq!(result.realized.len(), 1);
        assert_eq!(result.realized[0].age_days, 5);
        assert_eq!(result.realized[0].earned, d(2024, 1, 5));
        assert_eq!(result.realized[0].payee_name, "Rent");
        assert_eq!(result.unspent, m(30_000));
        assert_eq!(result.total_earned - result.total_spent, result.unspent);
    }

    #[test]
    fn test_credit_spending_aged_at_payment() {
        let f = fixture();
        let transactions = vec![
            Transaction::new(f.checking.id, d(2024, 1, 1), m(100_000)),
            Transaction::new(f.card.id, d(2024, 1, 3), m(-20_000)),
            Transaction::transfer(f.card.id, f.checking.id, d(2024, 1, 21), m(20_000)),
            Transaction::transfer(f.checking.id, f.card.id, d(2024, 1, 21), m(-20_000)),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, vec![]);

        let result = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap();
        assert_eq!(result.realized.len(), 1);
        assert_eq!(result.realized[0].spent, d(2024, 1, 21));
        assert_eq!(result.realized[0].age_days, 20);
        assert_eq!(result.realized[0].account_name, "Visa");
    }

    #[test]
    fn test_no_income_is_an_error() {
        let f = fixture();
        let transactions = vec![Transaction::new(f.checking.id, d(2024, 1, 1), m(-5_000))];
        let ledger = Ledger::new(f.accounts(), transactions, vec![]);

        let err = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap_err();
        assert!(matches!(err, AgeError::NoIncome));
    }

    #[test]
    fn test_overspent_history_is_inconsistency() {
        let f = fixture();
        let transactions = vec![
            Transaction::new(f.checking.id, d(2024, 1, 1), m(10_000)),
            Transaction::new(f.checking.id, d(2024, 1, 2), m(-12_500)),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, vec![]);

        let err = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap_err();
        assert!(err.is_data_inconsistency());
        assert!(matches!(
            err,
            AgeError::DataInconsistency(Inconsistency::Overspent { shortfall, .. })
                if shortfall == m(2_500)
        ));
    }

    #[test]
    fn test_projection_not_earned_yet() {
        let f = fixture();
        let transactions = vec![
            Transaction::new(f.checking.id, d(2024, 1, 1), m(30_000)),
            Transaction::new(f.checking.id, d(2024, 1, 2), m(-20_000)),
        ];
        let scheduled = vec![
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 10), m(-25_000))
                .named("Checking", "Insurance"),
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 20), m(-1_000)),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, scheduled);

        let result = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap();
        assert_eq!(result.unspent, m(10_000));
        assert_eq!(result.projected.len(), 1);
        assert_eq!(result.projected[0].age, ProjectedAge::NotEarnedYet);
        assert_eq!(result.projected[0].payee_name, "Insurance");
    }

    #[test]
    fn test_projection_with_scheduled_income() {
        let f = fixture();
        let transactions = vec![
            Transaction::new(f.checking.id, d(2024, 1, 1), m(10_000)),
        ];
        let scheduled = vec![
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 5), m(40_000)),
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 15), m(-25_000)),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, scheduled);

        let without = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap();
        assert_eq!(without.projected[0].age, ProjectedAge::NotEarnedYet);

        let options = AgeOptions {
            include_scheduled_income: true,
            ..AgeOptions::default()
        };
        let with = AgeOfMoneyService::with_options(&ledger, options)
            .compute(as_of())
            .unwrap();
        assert_eq!(
            with.projected[0].age,
            ProjectedAge::Aged {
                age_days: 10,
                earned: d(2024, 3, 5)
            }
        );
    }

    #[test]
    fn test_same_day_scheduled_income_is_queued_before_spending() {
        let f = fixture();
        let transactions = vec![Transaction::new(f.checking.id, d(2024, 1, 1), m(20_000))];
        let scheduled = vec![
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 10), m(-50_000))
                .named("Checking", "Tuition"),
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 10), m(40_000))
                .named("Checking", "Employer"),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, scheduled);
        let options = AgeOptions {
            include_scheduled_income: true,
            ..AgeOptions::default()
        };

        let result = AgeOfMoneyService::with_options(&ledger, options)
            .compute(as_of())
            .unwrap();
        assert_eq!(result.projected.len(), 1);
        assert_eq!(
            result.projected[0].age,
            ProjectedAge::Aged {
                age_days: 0,
                earned: d(2024, 3, 10)
            }
        );
    }

    #[test]
    fn test_same_day_scheduled_spends_smaller_first() {
        let f = fixture();
        let transactions = vec![Transaction::new(f.checking.id, d(2024, 1, 1), m(10_000))];
        let scheduled = vec![
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 10), m(-30_000))
                .named("Checking", "Big"),
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 10), m(-5_000))
                .named("Checking", "Small"),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, scheduled);

        let result = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap();
        let payees: Vec<_> = result.projected.iter().map(|p| p.payee_name.as_str()).collect();
        assert_eq!(payees, vec!["Small", "Big"]);
        assert!(matches!(result.projected[0].age, ProjectedAge::Aged { .. }));
        assert_eq!(result.projected[1].age, ProjectedAge::NotEarnedYet);
    }

    #[test]
    fn test_scheduled_transfer_from_tracking_account_funds_projection() {
        let f = fixture();
        let transactions = vec![Transaction::new(f.checking.id, d(2024, 1, 1), m(1_000))];
        let scheduled = vec![
            ScheduledTransaction::transfer(f.brokerage.id, f.checking.id, d(2024, 3, 2), m(-50_000)),
            ScheduledTransaction::new(f.checking.id, d(2024, 3, 4), m(-20_000)),
        ];
        let ledger = Ledger::new(f.accounts(), transactions, scheduled);
        let options = AgeOptions {
            include_scheduled_income: true,
            ..AgeOptions::default()
        };

        let result = AgeOfMoneyService::with_options(&ledger, options)
            .compute(as_of())
            .unwrap();
        assert_eq!(
            result.projected[0].age,
            ProjectedAge::Aged {
                age_days: 2,
                earned: d(2024, 3, 2)
            }
        );
        assert_eq!(result.projected[0].account_name, "Checking");
    }

    #[test]
    fn test_projection_ages_from_remaining_buckets() {
        let f = fixture();
        let transactions = vec![
            Transaction::new(f.checking.id, d(2024, 1, 1), m(40_000)),
            Transaction::new(f.checking.id, d(2024, 2, 1), m(40_000)),
            Transaction::new(f.checking.id, d(2024, 1, 15), m(-30_000)),
        ];
        let scheduled = vec![ScheduledTransaction::new(f.checking.id, d(2024, 3, 1), m(-20_000))];
        let ledger = Ledger::new(f.accounts(), transactions, scheduled);

        let result = AgeOfMoneyService::new(&ledger).compute(as_of()).unwrap();
        assert_eq!(
            result.projected[0].age,
            ProjectedAge::Aged {
                age_days: 29,
                earned: d(2024, 2, 1)
            }
        );
        assert_eq!(result.thresholds[0].cumulative, m(10_000));
        assert_eq!(result.thresholds[1].cumulative, m(50_000));
    }

    #[test]
    fn test_recent_average_age() {
        let spend = |age_days| RealizedSpend {
            age_days,
            earned: d(2024, 1, 1),
            spent: d(2024, 1, 1),
            amount: m(1),
            account_name: String::new(),
            payee_name: String::new(),
        };
        let result = AgeOfMoney {
            realized: vec![spend(100), spend(10), spend(20), spend(25)],
            thresholds: vec![],
            projected: vec![],
            total_earned: Money::zero(),
            total_spent: Money::zero(),
            unspent: Money::zero(),
        };
        assert_eq!(result.latest_age(), Some(25));
        assert_eq!(result.recent_average_age(3), Some(18));
        assert_eq!(result.recent_average_age(10), Some(39));
    }
}
