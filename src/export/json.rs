//! JSON Export functionality
//!
//! Writes the age of money report as a versioned document. Amounts are
//! integer milliunits.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AgeError, AgeResult};
use crate::models::Money;
use crate::reports::AgeOfMoneyReport;
use crate::services::{ProjectedSpend, RealizedSpend, Threshold};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Headline numbers of a report
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub latest_age: Option<i64>,
    pub recent_average_age: Option<i64>,
    pub recent_count: usize,
    pub total_earned: Money,
    pub total_spent: Money,
    pub unspent: Money,
}

/// Age of money report document
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    pub schema_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub budget: &'a str,
    pub summary: ExportSummary,
    pub realized: &'a [RealizedSpend],
    pub thresholds: &'a [Threshold],
    pub projected: &'a [ProjectedSpend],
}

impl<'a> ReportExport<'a> {
    pub fn from_report(report: &'a AgeOfMoneyReport) -> Self {
        let result = &report.result;
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            budget: &report.budget_name,
            summary: ExportSummary {
                latest_age: result.latest_age(),
                recent_average_age: result.recent_average_age(report.recent),
                recent_count: report.recent,
                total_earned: result.total_earned,
                total_spent: result.total_spent,
                unspent: result.unspent,
            },
            realized: &result.realized,
            thresholds: &result.thresholds,
            projected: &result.projected,
        }
    }
}

/// Export the report to JSON
pub fn export_report_json<W: Write>(
    report: &AgeOfMoneyReport,
    writer: &mut W,
    pretty: bool,
) -> AgeResult<()> {
    let export = ReportExport::from_report(report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| AgeError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AgeError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::export::tests::sample_report;

    #[test]
    fn test_json_export() {
        let report = sample_report(&Settings::default());
        let mut output = Vec::new();
        export_report_json(&report, &mut output, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["budget"], "Household");
        assert_eq!(value["realized"][0]["age_days"], 14);
        assert_eq!(value["realized"][0]["amount"], 40_000);
        assert_eq!(value["summary"]["unspent"], 60_000);
        assert_eq!(value["projected"][0]["age"]["status"], "not_earned_yet");
        assert!(value["thresholds"].is_array());
    }

    #[test]
    fn test_compact_json_is_one_line() {
        let report = sample_report(&Settings::default());
        let mut output = Vec::new();
        export_report_json(&report, &mut output, false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }
}
