//! User settings for age-of-money
//!
//! Display preferences and the tuning knobs of the reports. Every field has a
//! default, so a partial `config.json` is valid.

use serde::{Deserialize, Serialize};

use super::paths::AomPaths;
use crate::error::{AgeError, AgeResult};
use crate::models::Money;
use crate::services::allocator::ThresholdLimits;

/// User settings for age-of-money
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Let scheduled income fund projected spending
    #[serde(default)]
    pub include_scheduled_income: bool,

    /// Most upcoming buckets listed as thresholds
    #[serde(default = "default_threshold_max_buckets")]
    pub threshold_max_buckets: usize,

    /// Stop listing thresholds once this much money is covered
    #[serde(default = "default_threshold_limit")]
    pub threshold_limit: Money,

    /// Number of most recent spends highlighted on a terminal
    #[serde(default = "default_highlight_recent")]
    pub highlight_recent: usize,

    /// Flows report: always list at least this many entries
    #[serde(default = "default_flows_min_listed")]
    pub flows_min_listed: usize,

    /// Flows report: after the minimum, stop after the first smaller entry
    #[serde(default = "default_flows_listing_floor")]
    pub flows_listing_floor: Money,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_threshold_max_buckets() -> usize {
    ThresholdLimits::default().max_buckets
}

fn default_threshold_limit() -> Money {
    ThresholdLimits::default().limit
}

fn default_highlight_recent() -> usize {
    10
}

fn default_flows_min_listed() -> usize {
    10
}

fn default_flows_listing_floor() -> Money {
    Money::from_units(100)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            include_scheduled_income: false,
            threshold_max_buckets: default_threshold_max_buckets(),
            threshold_limit: default_threshold_limit(),
            highlight_recent: default_highlight_recent(),
            flows_min_listed: default_flows_min_listed(),
            flows_listing_floor: default_flows_listing_floor(),
        }
    }
}

impl Settings {
    /// Threshold listing limits from these settings
    pub fn threshold_limits(&self) -> ThresholdLimits {
        ThresholdLimits {
            max_buckets: self.threshold_max_buckets,
            limit: self.threshold_limit,
        }
    }

    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &AomPaths) -> AgeResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AgeError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AgeError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AomPaths) -> AgeResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AgeError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AgeError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
