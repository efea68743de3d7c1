//! CLI command for the largest inflows and outflows report

use clap::Args;

use crate::config::Settings;
use crate::error::AgeResult;
use crate::reports::{FlowFilter, FlowPeriod, FlowsReport, ListingRule};
use crate::storage::SnapshotStore;

/// Arguments of `aom flows`
#[derive(Args, Debug)]
pub struct FlowsArgs {
    /// Month to report on, e.g. "Aug 2019" or "August 2019"
    #[arg(long)]
    pub month: Option<String>,

    /// Year to report on, e.g. 2019
    #[arg(long)]
    pub year: Option<String>,

    /// Comma separated list of account names to exclude
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

/// Handle `aom flows`
pub fn handle_flows_command(
    store: &SnapshotStore,
    settings: &Settings,
    budget_name: Option<&str>,
    args: FlowsArgs,
) -> AgeResult<()> {
    let period = FlowPeriod::from_args(args.month.as_deref(), args.year.as_deref())?;
    let (_, ledger) = store.load_selected(budget_name)?;

    let filter = FlowFilter {
        period,
        exclude_accounts: args.exclude,
    };
    let rule = ListingRule {
        min_listed: settings.flows_min_listed,
        floor: settings.flows_listing_floor,
    };
    let report = FlowsReport::generate(&ledger, &filter, rule)?;

    print!(
        "{}",
        report.format_terminal(&settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}
