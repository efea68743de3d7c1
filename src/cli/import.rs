//! CLI command handler for snapshot import
//!
//! Takes saved API responses (accounts, transactions and optionally
//! scheduled transactions) and stores them as a named budget snapshot.

use std::path::PathBuf;

use clap::Args;

use crate::error::AgeResult;
use crate::storage::SnapshotStore;

/// Arguments of `aom import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Name to store the budget under
    pub name: String,

    /// Accounts response (`{"data": {"accounts": [...]}}`)
    #[arg(long)]
    pub accounts: PathBuf,

    /// Transactions response (`{"data": {"transactions": [...]}}`)
    #[arg(long)]
    pub transactions: PathBuf,

    /// Scheduled transactions response
    #[arg(long)]
    pub scheduled: Option<PathBuf>,
}

/// Handle `aom import`
pub fn handle_import_command(store: &SnapshotStore, args: ImportArgs) -> AgeResult<()> {
    let ledger = store.import(
        &args.name,
        &args.accounts,
        &args.transactions,
        args.scheduled.as_deref(),
    )?;

    println!("Imported budget '{}'", args.name);
    println!("{}", "=".repeat(40));
    println!("  Accounts:               {}", ledger.accounts.len());
    println!("  Transactions:           {}", ledger.transactions.len());
    println!("  Scheduled transactions: {}", ledger.scheduled.len());
    println!();
    println!(
        "Stored in: {}",
        store.paths().budget_dir(&args.name).display()
    );

    Ok(())
}
