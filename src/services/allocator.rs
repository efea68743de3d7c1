//! FIFO matching of spending against earned money
//!
//! Income forms a queue of dated buckets. Spending drains that queue from the
//! oldest bucket forward; a spend is as old as the bucket its last unit came
//! out of. The cursor only ever moves forward.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{AgeError, AgeResult};
use crate::models::Money;

/// A dated unit of earned money, available to be spent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub amount: Money,
    pub date: NaiveDate,
    pub account_name: String,
    pub payee_name: String,
}

impl Bucket {
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            amount,
            date,
            account_name: String::new(),
            payee_name: String::new(),
        }
    }

    pub fn labelled(mut self, account_name: impl Into<String>, payee_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self.payee_name = payee_name.into();
        self
    }
}

/// A dated, sign-normalized spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingEvent {
    pub amount: Money,
    pub date: NaiveDate,
    pub account_name: String,
    pub payee_name: String,
}

impl SpendingEvent {
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            amount,
            date,
            account_name: String::new(),
            payee_name: String::new(),
        }
    }

    pub fn labelled(mut self, account_name: impl Into<String>, payee_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self.payee_name = payee_name.into();
        self
    }
}

/// Order spending oldest first, larger spends first within a day
pub fn sort_spending(events: &mut [SpendingEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then(b.amount.cmp(&a.amount)));
}

/// Outcome of drawing an amount from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumption {
    /// Fully funded; `earned` is the date of the bucket the last unit came from
    Drawn { earned: NaiveDate },
    /// The queue ran dry with `shortfall` still unfunded
    Exhausted { shortfall: Money },
}

/// Whole days between earning and spending
pub fn age_in_days(earned: NaiveDate, spent: NaiveDate) -> i64 {
    (spent - earned).num_days()
}

/// How far ahead the threshold listing looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdLimits {
    pub max_buckets: usize,
    pub limit: Money,
}

impl Default for ThresholdLimits {
    fn default() -> Self {
        Self {
            max_buckets: 25,
            limit: Money::from_units(20_000),
        }
    }
}

/// One upcoming bucket and the money that has to be spent to reach past it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Threshold {
    /// Age the next spend would have if it drained up to this bucket now
    pub age_if_spent_today: i64,
    pub bucket_date: NaiveDate,
    /// Unspent money up to and including this bucket
    pub cumulative: Money,
    pub account_name: String,
    pub payee_name: String,
}

/// The bucket queue and its read cursor
#[derive(Debug, Clone)]
pub struct FifoAllocator {
    buckets: Vec<Bucket>,
    index: usize,
    spent: Money,
}

impl FifoAllocator {
    /// Build the queue, oldest bucket first. Non-positive buckets are dropped.
    pub fn new(mut buckets: Vec<Bucket>) -> Self {
        buckets.retain(|b| b.amount.is_positive());
        buckets.sort_by_key(|b| b.date);
        Self {
            buckets,
            index: 0,
            spent: Money::zero(),
        }
    }

    /// Add income at the back of the queue
    pub fn push_bucket(&mut self, bucket: Bucket) {
        if bucket.amount.is_positive() {
            self.buckets.push(bucket);
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Index of the bucket currently being drained
    pub fn index(&self) -> usize {
        self.index
    }

    /// How much of the current bucket is already spent
    pub fn spent_from_current(&self) -> Money {
        self.spent
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.buckets.len()
    }

    /// Draw `amount` from the oldest unspent money
    pub fn consume(&mut self, amount: Money) -> AgeResult<Consumption> {
        if !amount.is_positive() {
            return Err(AgeError::Validation(format!(
                "spending amount must be positive, got {}",
                amount
            )));
        }

        let mut remaining = amount;
        let mut earned = None;
        while remaining.is_positive() {
            let Some(bucket) = self.buckets.get(self.index) else {
                return Ok(Consumption::Exhausted {
                    shortfall: remaining,
                });
            };
            earned = Some(bucket.date);
            let capacity = bucket.amount - self.spent;
            if remaining < capacity {
                self.spent += remaining;
                remaining = Money::zero();
            } else {
                remaining -= capacity;
                self.index += 1;
                self.spent = Money::zero();
            }
        }

        match earned {
            Some(earned) => Ok(Consumption::Drawn { earned }),
            None => Ok(Consumption::Exhausted { shortfall: remaining }),
        }
    }

    /// Unspent money left in the queue
    pub fn remaining_capacity(&self) -> Money {
        let rest: Money = self
            .buckets
            .iter()
            .skip(self.index)
            .map(|b| b.amount)
            .sum();
        rest - self.spent
    }

    /// List the buckets ahead of the cursor with cumulative unspent totals.
    ///
    /// Stops after `limits.max_buckets` entries, or as soon as the running
    /// total reaches `limits.limit`.
    pub fn thresholds(&self, as_of: NaiveDateTime, limits: ThresholdLimits) -> Vec<Threshold> {
        let mut out = Vec::new();
        let mut cumulative = Money::zero();

        for (offset, bucket) in self.buckets.iter().skip(self.index).enumerate() {
            if offset >= limits.max_buckets {
                break;
            }
            cumulative += if offset == 0 {
                bucket.amount - self.spent
            } else {
                bucket.amount
            };
            out.push(Threshold {
                age_if_spent_today: age_if_spent_at(bucket.date, as_of),
                bucket_date: bucket.date,
                cumulative,
                account_name: bucket.account_name.clone(),
                payee_name: bucket.payee_name.clone(),
            });
            if cumulative >= limits.limit {
                break;
            }
        }
        out
    }
}

/// Days from the bucket's midnight to `as_of`, rounded, less one
fn age_if_spent_at(date: NaiveDate, as_of: NaiveDateTime) -> i64 {
    let minutes = (as_of - date.and_time(chrono::NaiveTime::MIN)).num_minutes();
    (minutes + 720).div_euclid(1440) - 1
}
