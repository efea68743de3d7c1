//! CLI command for transaction export

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate};
use clap::Args;

use super::create_output;
use crate::error::{AgeError, AgeResult};
use crate::export::{export_transactions_csv, TransactionFilter};
use crate::storage::SnapshotStore;

/// Arguments of `aom export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Only transactions on or after this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub since: Option<String>,

    /// Only transactions in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `aom export`
pub fn handle_export_command(
    store: &SnapshotStore,
    budget_name: Option<&str>,
    args: ExportArgs,
) -> AgeResult<()> {
    let filter = TransactionFilter {
        since: args.since.as_deref().map(parse_since).transpose()?,
        category: args.category,
    };
    let (_, ledger) = store.load_selected(budget_name)?;

    match args.output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            let count = export_transactions_csv(&ledger, &filter, &mut writer)?;
            writer
                .flush()
                .map_err(|e| AgeError::Export(e.to_string()))?;
            println!("Exported {} transactions to: {}", count, path.display());
        }
        None => {
            export_transactions_csv(&ledger, &filter, io::stdout().lock())?;
        }
    }

    Ok(())
}

fn parse_since(s: &str) -> AgeResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| {
            AgeError::Validation(format!(
                "Invalid --since date '{}', expected YYYY-MM-DD",
                s
            ))
        })
}
