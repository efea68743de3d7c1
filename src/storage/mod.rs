//! Storage layer for age-of-money
//!
//! Budget snapshots are plain JSON files in the budgeting API's response
//! shape, written atomically and read with buffered readers.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use snapshot::{ApiEnvelope, SnapshotStore};
