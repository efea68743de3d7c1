//! Budget snapshots on disk
//!
//! A snapshot is one directory per budget holding the budgeting API's own
//! response bodies:
//!
//! ```text
//! budgets/<name>/accounts.json                {"data": {"accounts": [...]}}
//! budgets/<name>/transactions.json            {"data": {"transactions": [...]}}
//! budgets/<name>/scheduled_transactions.json  {"data": {"scheduled_transactions": [...]}}
//! ```
//!
//! The scheduled file is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::file_io::{read_json, read_json_required, write_json_atomic};
use crate::config::paths::AomPaths;
use crate::error::{AgeError, AgeResult};
use crate::models::{Account, Ledger, ScheduledTransaction, Transaction};

pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const SCHEDULED_FILE: &str = "scheduled_transactions.json";

/// Response wrapper used by every API endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountList {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduledList {
    pub scheduled_transactions: Vec<ScheduledTransaction>,
}

/// Reads and writes budget snapshots under the data directory
pub struct SnapshotStore {
    paths: AomPaths,
}

impl SnapshotStore {
    pub fn new(paths: AomPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AomPaths {
        &self.paths
    }

    /// Pick the budget to work on.
    ///
    /// A lone budget is always used, whatever name was asked for. With
    /// several, a name is required.
    pub fn select_budget(&self, requested: Option<&str>) -> AgeResult<String> {
        let budgets = self.paths.list_budgets()?;

        if let [only] = budgets.as_slice() {
            if let Some(name) = requested {
                if !only.eq_ignore_ascii_case(name) {
                    warn!(requested = name, using = %only, "only one budget, ignoring budget name");
                }
            }
            return Ok(only.clone());
        }

        match requested {
            Some(name) => budgets
                .iter()
                .find(|b| b.as_str() == name)
                .or_else(|| budgets.iter().find(|b| b.eq_ignore_ascii_case(name)))
                .cloned()
                .ok_or_else(|| AgeError::budget_not_found(name)),
            None => match budgets.as_slice() {
                [] => Err(AgeError::Storage(format!(
                    "No budgets found in {}",
                    self.paths.data_dir().display()
                ))),
                many => Err(AgeError::Validation(format!(
                    "Multiple budgets found, choose one with --budget-name: {}",
                    many.join(", ")
                ))),
            },
        }
    }

    /// Load one budget's snapshot
    pub fn load(&self, budget: &str) -> AgeResult<Ledger> {
        let dir = self.paths.budget_dir(budget);
        if !dir.is_dir() {
            return Err(AgeError::budget_not_found(budget));
        }

        let accounts: ApiEnvelope<AccountList> = read_json_required(dir.join(ACCOUNTS_FILE))?;
        let transactions: ApiEnvelope<TransactionList> =
            read_json_required(dir.join(TRANSACTIONS_FILE))?;
        let scheduled: ApiEnvelope<ScheduledList> = read_json(dir.join(SCHEDULED_FILE))?;

        let ledger = Ledger::new(
            accounts.data.accounts,
            transactions.data.transactions,
            scheduled.data.scheduled_transactions,
        );
        info!(
            budget,
            accounts = ledger.accounts.len(),
            transactions = ledger.transactions.len(),
            scheduled = ledger.scheduled.len(),
            "loaded snapshot"
        );
        Ok(ledger)
    }

    /// Select a budget and load it
    pub fn load_selected(&self, requested: Option<&str>) -> AgeResult<(String, Ledger)> {
        let budget = self.select_budget(requested)?;
        let ledger = self.load(&budget)?;
        Ok((budget, ledger))
    }

    /// Write a snapshot for a budget, replacing any existing one
    pub fn save(&self, budget: &str, ledger: &Ledger) -> AgeResult<PathBuf> {
        validate_budget_name(budget)?;
        let dir = self.paths.budget_dir(budget);

        write_json_atomic(
            dir.join(ACCOUNTS_FILE),
            &ApiEnvelope::new(AccountList {
                accounts: ledger.accounts.clone(),
            }),
        )?;
        write_json_atomic(
            dir.join(TRANSACTIONS_FILE),
            &ApiEnvelope::new(TransactionList {
                transactions: ledger.transactions.clone(),
            }),
        )?;
        write_json_atomic(
            dir.join(SCHEDULED_FILE),
            &ApiEnvelope::new(ScheduledList {
                scheduled_transactions: ledger.scheduled.clone(),
            }),
        )?;

        debug!(budget, dir = %dir.display(), "saved snapshot");
        Ok(dir)
    }

    /// Copy API response files into the data directory as a new snapshot
    pub fn import(
        &self,
        budget: &str,
        accounts: &Path,
        transactions: &Path,
        scheduled: Option<&Path>,
    ) -> AgeResult<Ledger> {
        let accounts: ApiEnvelope<AccountList> = read_json_required(accounts)?;
        let transactions: ApiEnvelope<TransactionList> = read_json_required(transactions)?;
        let scheduled: ApiEnvelope<ScheduledList> = match scheduled {
            Some(path) => read_json_required(path)?,
            None => ApiEnvelope::default(),
        };

        let ledger = Ledger::new(
            accounts.data.accounts,
            transactions.data.transactions,
            scheduled.data.scheduled_transactions,
        );
        self.save(budget, &ledger)?;
        Ok(ledger)
    }
}

fn validate_budget_name(name: &str) -> AgeResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed != name {
        return Err(AgeError::Validation(format!(
            "Invalid budget name '{}'",
            name
        )));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(AgeError::Validation(format!(
            "Budget name '{}' cannot contain path separators",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_store() -> (TempDir, SnapshotStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AomPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        (temp_dir, SnapshotStore::new(paths))
    }

    fn sample_ledger() -> Ledger {
        let checking = Account::new("Checking", AccountType::Checking);
        let txn = Transaction::new(
            checking.id,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Money::from_milliunits(5_000),
        );
        Ledger::new(vec![checking], vec![txn], vec![])
    }

    #[test]
    fn test_save_and_load() {
        let (_temp, store) = create_store();
        store.save("Household", &sample_ledger()).unwrap();

        let ledger = store.load("Household").unwrap();
        assert_eq!(ledger.accounts.len(), 1);
        assert_eq!(ledger.transactions.len(), 1);
        assert!(ledger.scheduled.is_empty());
    }

    #[test]
    fn test_load_api_response_shape() {
        let (_temp, store) = create_store();
        let dir = store.paths().budget_dir("Imported");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(ACCOUNTS_FILE),
            r#"{"data": {"accounts": [{
                "id": "e0dc51c5-5136-4a3f-9019-84487d266cbb",
                "name": "Cash",
                "type": "cash",
                "on_budget": true,
                "closed": false,
                "note": null,
                "balance": 12000,
                "cleared_balance": 12000,
                "uncleared_balance": 0,
                "transfer_payee_id": "0fb63639-3dd8-435c-b17c-d50f8b7bbeb6",
                "deleted": false
            }]}}"#,
        )
        .unwrap();
        fs::write(
            dir.join(TRANSACTIONS_FILE),
            r#"{"data": {"transactions": [], "server_knowledge": 12}}"#,
        )
        .unwrap();

        let ledger = store.load("Imported").unwrap();
        assert_eq!(ledger.accounts[0].account_type, AccountType::Cash);
        assert!(ledger.scheduled.is_empty());
    }

    #[test]
    fn test_missing_transactions_file_is_storage_error() {
        let (_temp, store) = create_store();
        let dir = store.paths().budget_dir("Broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ACCOUNTS_FILE), r#"{"data": {"accounts": []}}"#).unwrap();

        let err = store.load("Broken").unwrap_err();
        assert!(matches!(err, AgeError::Storage(_)));
    }

    #[test]
    fn test_select_single_budget() {
        let (_temp, store) = create_store();
        store.save("Only", &sample_ledger()).unwrap();
        assert_eq!(store.select_budget(None).unwrap(), "Only");
        assert_eq!(store.select_budget(Some("only")).unwrap(), "Only");
        assert_eq!(store.select_budget(Some("Vacation")).unwrap(), "Only");
    }

    #[test]
    fn test_select_requires_name_with_many_budgets() {
        let (_temp, store) = create_store();
        store.save("Personal", &sample_ledger()).unwrap();
        store.save("Business", &sample_ledger()).unwrap();

        let err = store.select_budget(None).unwrap_err();
        assert!(matches!(err, AgeError::Validation(_)));
        assert!(err.to_string().contains("Business, Personal"));

        assert_eq!(store.select_budget(Some("Business")).unwrap(), "Business");
        assert!(store.select_budget(Some("Travel")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_select_with_no_budgets() {
        let (_temp, store) = create_store();
        assert!(matches!(
            store.select_budget(None).unwrap_err(),
            AgeError::Storage(_)
        ));
    }

    #[test]
    fn test_import_copies_response_files() {
        let (temp, store) = create_store();
        let accounts = temp.path().join("accounts-response.json");
        let transactions = temp.path().join("transactions-response.json");
        fs::write(&accounts, r#"{"data": {"accounts": []}}"#).unwrap();
        fs::write(&transactions, r#"{"data": {"transactions": []}}"#).unwrap();

        store.import("Fresh", &accounts, &transactions, None).unwrap();
        assert_eq!(store.paths().list_budgets().unwrap(), vec!["Fresh"]);
        assert!(store.paths().budget_dir("Fresh").join(SCHEDULED_FILE).exists());
    }

    #[test]
    fn test_rejects_path_like_budget_names() {
        let (_temp, store) = create_store();
        assert!(store.save("../escape", &sample_ledger()).is_err());
        assert!(store.save("", &sample_ledger()).is_err());
    }
}
