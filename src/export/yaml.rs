//! YAML Export functionality

use std::io::Write;

use crate::error::{AgeError, AgeResult};
use crate::export::json::ReportExport;
use crate::reports::AgeOfMoneyReport;

/// Export the report to YAML, behind a short comment header
pub fn export_report_yaml<W: Write>(report: &AgeOfMoneyReport, writer: &mut W) -> AgeResult<()> {
    let export = ReportExport::from_report(report);
    let io_err = |e: std::io::Error| AgeError::Export(e.to_string());

    writeln!(writer, "# Age of money report: {}", export.budget).map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.generated_at).map_err(io_err)?;
    writeln!(writer, "# Amounts are in milliunits").map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| AgeError::Export(e.to_string()))?;

    Ok(())
}
