use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use age_of_money::cli::{
    handle_age_command, handle_export_command, handle_flows_command, handle_import_command,
    AgeArgs, ExportArgs, FlowsArgs, ImportArgs,
};
use age_of_money::config::{paths::AomPaths, settings::Settings};
use age_of_money::storage::SnapshotStore;

#[derive(Parser)]
#[command(
    name = "aom",
    version,
    about = "Age of money reports for YNAB-style budget snapshots",
    long_about = "aom matches every dollar you spend against the oldest dollar you \
                  earned and reports how old your money is, what it would take to \
                  age it further, and how old scheduled spending will be."
)]
struct Cli {
    /// Base directory holding config.json and budgets/
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Budget to use (required when more than one exists)
    #[arg(long, global = true, env = "AOM_BUDGET_NAME")]
    budget_name: Option<String>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Age of money, spending thresholds and projected ages
    Age(AgeArgs),

    /// Largest inflows and outflows of the accounts as a whole
    Flows(FlowsArgs),

    /// Export transactions as CSV
    Export(ExportArgs),

    /// Store saved API responses as a budget snapshot
    Import(ImportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let paths = match cli.data_dir {
        Some(dir) => AomPaths::with_base_dir(dir),
        None => AomPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let store = SnapshotStore::new(paths.clone());
    let budget_name = cli.budget_name.as_deref();

    match cli.command {
        Some(Commands::Age(args)) => handle_age_command(&store, &settings, budget_name, args)?,
        Some(Commands::Flows(args)) => {
            handle_flows_command(&store, &settings, budget_name, args)?
        }
        Some(Commands::Export(args)) => handle_export_command(&store, budget_name, args)?,
        Some(Commands::Import(args)) => handle_import_command(&store, args)?,
        Some(Commands::Config) => {
            println!("age-of-money Configuration");
            println!("==========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            let budgets = paths.list_budgets()?;
            if budgets.is_empty() {
                println!("Budgets:         (none)");
            } else {
                println!("Budgets:         {}", budgets.join(", "));
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol:          {}", settings.currency_symbol);
            println!("  Date format:              {}", settings.date_format);
            println!("  Include scheduled income: {}", settings.include_scheduled_income);
            println!("  Threshold buckets:        {}", settings.threshold_max_buckets);
            println!("  Threshold limit:          {}", settings.threshold_limit);
            println!("  Highlight recent:         {}", settings.highlight_recent);
            println!("  Flows minimum listed:     {}", settings.flows_min_listed);
            println!("  Flows listing floor:      {}", settings.flows_listing_floor);
        }
        None => {
            println!("aom - age of money for budget snapshots");
            println!();
            println!("Run 'aom --help' for usage information.");
            println!("Run 'aom age' to see how old your money is.");
        }
    }

    Ok(())
}
