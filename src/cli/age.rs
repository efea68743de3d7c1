//! CLI command for the age of money report

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, ValueEnum};

use super::create_output;
use crate::config::Settings;
use crate::error::{AgeError, AgeResult};
use crate::export::{export_report_json, export_report_yaml};
use crate::reports::AgeOfMoneyReport;
use crate::storage::SnapshotStore;

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned text for the terminal
    Text,
    /// One row per spend, threshold or projection
    Csv,
    /// Versioned JSON document
    Json,
    /// Versioned YAML document
    Yaml,
}

/// Arguments of `aom age`
#[derive(Args, Debug)]
pub struct AgeArgs {
    /// Let scheduled income fund projected spending
    #[arg(long)]
    pub include_scheduled_income: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `aom age`
pub fn handle_age_command(
    store: &SnapshotStore,
    settings: &Settings,
    budget_name: Option<&str>,
    args: AgeArgs,
) -> AgeResult<()> {
    let (budget, ledger) = store.load_selected(budget_name)?;

    let mut settings = settings.clone();
    if args.include_scheduled_income {
        settings.include_scheduled_income = true;
    }

    let as_of = Local::now().naive_local();
    let report = AgeOfMoneyReport::generate(&ledger, budget, &settings, as_of)?;

    match args.output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            write_report(&report, args.format, &mut writer, false)?;
            writer
                .flush()
                .map_err(|e| AgeError::Export(e.to_string()))?;
            println!("Report written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let highlight = stdout.is_terminal();
            let mut writer = stdout.lock();
            write_report(&report, args.format, &mut writer, highlight)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &AgeOfMoneyReport,
    format: ReportFormat,
    writer: &mut W,
    highlight: bool,
) -> AgeResult<()> {
    match format {
        ReportFormat::Text => writer
            .write_all(report.format_terminal(highlight).as_bytes())
            .map_err(|e| AgeError::Export(e.to_string()))?,
        ReportFormat::Csv => report.export_csv(&mut *writer)?,
        ReportFormat::Json => export_report_json(report, writer, true)?,
        ReportFormat::Yaml => export_report_yaml(report, writer)?,
    }
    Ok(())
}
