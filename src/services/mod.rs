//! Service layer for age-of-money
//!
//! Classification of ledger entries, FIFO matching of spending against
//! income, and the age of money computation built on both.

pub mod age;
pub mod allocator;
pub mod classifier;

pub use age::{AgeOfMoney, AgeOfMoneyService, AgeOptions, ProjectedAge, ProjectedSpend, RealizedSpend};
pub use allocator::{Bucket, Consumption, FifoAllocator, SpendingEvent, Threshold, ThresholdLimits};
pub use classifier::{classify, Classification, Classifier, Policy, Route, Side};
