//! Path management for age-of-money
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` on the command line
//! 2. `AOM_DATA_DIR` environment variable (if set)
//! 3. The platform config directory joined with `age-of-money`
//!    (`$XDG_CONFIG_HOME` or `~/.config` on Linux, `%APPDATA%` on Windows)
//!
//! Each budget snapshot lives in its own directory under `budgets/`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{AgeError, AgeResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "AOM_DATA_DIR";

const APP_DIR: &str = "age-of-money";

/// Manages all paths used by age-of-money
#[derive(Debug, Clone)]
pub struct AomPaths {
    base_dir: PathBuf,
}

impl AomPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> AgeResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };
        Ok(Self { base_dir })
    }

    /// Use an explicit base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding one sub-directory per budget snapshot
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("budgets")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Snapshot directory of a named budget
    pub fn budget_dir(&self, name: &str) -> PathBuf {
        self.data_dir().join(name)
    }

    /// Names of every budget snapshot on disk, sorted
    pub fn list_budgets(&self) -> AgeResult<Vec<String>> {
        let data_dir = self.data_dir();
        if !data_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&data_dir).map_err(|e| {
            AgeError::Io(format!(
                "Failed to read data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> AgeResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AgeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AgeError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> AgeResult<PathBuf> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| AgeError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR))
}
