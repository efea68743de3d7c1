//! Largest Inflows and Outflows Report
//!
//! Lists the biggest movements of money into and out of the accounts as a
//! whole, tracking accounts included. Credit card spending counts when the
//! card is paid, not when the purchase is made.

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::display::report::double_separator;
use crate::display::{clean_payee, format_date, format_grouped, truncate};
use crate::error::{AgeError, AgeResult};
use crate::models::{Ledger, Money};
use crate::services::{Classification, Classifier, Policy};

/// Calendar window a flows report is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPeriod {
    Month { year: i32, month: u32 },
    Year(i32),
}

impl FlowPeriod {
    /// Parse "Aug 2019" or "August 2019"
    pub fn parse_month(s: &str) -> AgeResult<Self> {
        let s = s.trim();
        let with_day = format!("1 {}", s);
        NaiveDate::parse_from_str(&with_day, "%d %b %Y")
            .or_else(|_| NaiveDate::parse_from_str(&with_day, "%d %B %Y"))
            .map(|date| Self::Month {
                year: date.year(),
                month: date.month(),
            })
            .map_err(|_| {
                AgeError::Validation(format!(
                    "Could not parse month '{}', expected e.g. 'Aug 2019'",
                    s
                ))
            })
    }

    /// Parse a four-digit year
    pub fn parse_year(s: &str) -> AgeResult<Self> {
        let s = s.trim();
        match s.parse::<i32>() {
            Ok(year) if s.len() == 4 => Ok(Self::Year(year)),
            _ => Err(AgeError::Validation(format!(
                "Could not parse year '{}', expected e.g. '2019'",
                s
            ))),
        }
    }

    /// Build a period from optional `--month` / `--year` arguments
    pub fn from_args(month: Option<&str>, year: Option<&str>) -> AgeResult<Option<Self>> {
        match (month, year) {
            (Some(_), Some(_)) => Err(AgeError::Validation(
                "Can't specify both --month and --year".into(),
            )),
            (Some(month), None) => Self::parse_month(month).map(Some),
            (None, Some(year)) => Self::parse_year(year).map(Some),
            (None, None) => Ok(None),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Month { year, month } => date.year() == year && date.month() == month,
            Self::Year(year) => date.year() == year,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Month { .. } => "Month",
            Self::Year(_) => "Year",
        }
    }
}

impl fmt::Display for FlowPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Month { year, month } => match NaiveDate::from_ymd_opt(year, month, 1) {
                Some(date) => write!(f, "{}", date.format("%B %Y")),
                None => write!(f, "{}-{:02}", year, month),
            },
            Self::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Which transactions a flows report looks at
#[derive(Debug, Clone, Default)]
pub struct FlowFilter {
    pub period: Option<FlowPeriod>,
    /// Account names to leave out entirely
    pub exclude_accounts: Vec<String>,
}

/// How many entries of each list are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRule {
    pub min_listed: usize,
    pub floor: Money,
}

impl Default for ListingRule {
    fn default() -> Self {
        Self {
            min_listed: 10,
            floor: Money::from_units(100),
        }
    }
}

impl ListingRule {
    /// Entries to print: everything up to and including the first entry
    /// below `floor` that comes after the first `min_listed`
    pub fn apply<'r>(&self, entries: &'r [FlowEntry]) -> &'r [FlowEntry] {
        let end = entries
            .iter()
            .enumerate()
            .position(|(i, e)| i >= self.min_listed && e.amount < self.floor)
            .map_or(entries.len(), |last| last + 1);
        &entries[..end]
    }
}

/// One inflow or outflow, with the running total of its list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEntry {
    pub date: NaiveDate,
    /// Magnitude of the flow
    pub amount: Money,
    pub running_total: Money,
    pub account_name: String,
    pub payee_name: String,
    pub memo: String,
}

/// Largest inflows and outflows report
#[derive(Debug, Clone)]
pub struct FlowsReport {
    pub period: Option<FlowPeriod>,
    /// Largest first
    pub inflows: Vec<FlowEntry>,
    /// Largest first
    pub outflows: Vec<FlowEntry>,
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub rule: ListingRule,
}

impl FlowsReport {
    /// Generate the report
    pub fn generate(ledger: &Ledger, filter: &FlowFilter, rule: ListingRule) -> AgeResult<Self> {
        let classifier = Classifier::new(&ledger.accounts);
        let excluded: HashSet<&str> = filter
            .exclude_accounts
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        let mut inflows = Vec::new();
        let mut outflows = Vec::new();

        for txn in &ledger.transactions {
            if txn.amount.is_zero() {
                continue;
            }
            if let Some(period) = &filter.period {
                if !period.contains(txn.date) {
                    continue;
                }
            }
            let account_name = if txn.account_name.is_empty() {
                classifier.account(txn.id, txn.account_id)?.name.clone()
            } else {
                txn.account_name.clone()
            };
            if excluded.contains(account_name.as_str()) {
                debug!(id = %txn.id, account = %account_name, "excluded");
                continue;
            }

            let entry = |amount| FlowEntry {
                date: txn.date,
                amount,
                running_total: Money::zero(),
                account_name: account_name.clone(),
                payee_name: txn.payee_name.clone(),
                memo: txn.memo.clone(),
            };
            match classifier.classify(Policy::NetWorth, txn)? {
                Classification::Income(amount) => inflows.push(entry(amount)),
                Classification::Outflow(amount) => outflows.push(entry(amount)),
                Classification::Ignored => {}
            }
        }

        let total_inflow = rank(&mut inflows);
        let total_outflow = rank(&mut outflows);

        Ok(Self {
            period: filter.period,
            inflows,
            outflows,
            total_inflow,
            total_outflow,
            rule,
        })
    }

    /// Inflows minus outflows over the period
    pub fn net(&self) -> Money {
        self.total_inflow - self.total_outflow
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str, date_format: &str) -> String {
        let mut output = String::new();

        if let Some(period) = &self.period {
            output.push_str(&format!(
                "{} Balance ({}): {}\n\n",
                period.label(),
                period,
                format_grouped(self.net(), symbol)
            ));
        }

        for (title, total, entries) in [
            ("Inflows", self.total_inflow, &self.inflows),
            ("Outflows", self.total_outflow, &self.outflows),
        ] {
            output.push_str(&format!("{}: {}\n", title, format_grouped(total, symbol)));
            output.push_str(&double_separator(32));
            output.push('\n');
            for entry in self.rule.apply(entries) {
                let payee = clean_payee(&entry.payee_name);
                let described = if entry.memo.is_empty() {
                    payee
                } else {
                    format!("{:?} {:?}", payee, entry.memo)
                };
                output.push_str(&format!(
                    "{} {:>14} {:>14} {:<22} {}\n",
                    format_date(entry.date, date_format),
                    format_grouped(entry.amount, symbol),
                    format_grouped(entry.running_total, symbol),
                    truncate(&entry.account_name, 22),
                    described
                ));
            }
            output.push('\n');
        }

        output
    }
}

/// Sort largest first, fill in running totals, return the list total
fn rank(entries: &mut [FlowEntry]) -> Money {
    entries.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.date.cmp(&b.date)));
    let mut running = Money::zero();
    for entry in entries.iter_mut() {
        running += entry.amount;
        entry.running_total = running;
    }
    running
}
