//! age-of-money - how long money sits between being earned and being spent
//!
//! Income in on-budget cash accounts forms a queue of dated buckets. Budget
//! spending drains that queue oldest-first, and the age of a spend is the
//! number of days since the bucket it finished in was earned. Credit card
//! purchases are aged when the card is paid, not when they are made.
//!
//! # Architecture
//!
//! - `models`: Ledger snapshot types (accounts, transactions, money)
//! - `services`: Classification, FIFO allocation and the age computation
//! - `reports`: Age of money and largest inflows/outflows reports
//! - `export`: CSV, JSON and YAML writers
//! - `storage`: Budget snapshots on disk
//! - `config`: Path resolution and user settings
//! - `cli`: Command handlers for the `aom` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use age_of_money::config::AomPaths;
//! use age_of_money::services::AgeOfMoneyService;
//! use age_of_money::storage::SnapshotStore;
//!
//! let store = SnapshotStore::new(AomPaths::new()?);
//! let (_, ledger) = store.load_selected(None)?;
//! let result = AgeOfMoneyService::new(&ledger).compute(chrono::Local::now().naive_local())?;
//! println!("{:?}", result.latest_age());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{AgeError, AgeResult};
