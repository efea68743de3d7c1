//! Age of Money Report
//!
//! Shows how old each posted spend was, how much money sits ahead of the
//! cursor, and how old scheduled spending will be.

use std::io::Write;

use chrono::NaiveDateTime;

use crate::config::Settings;
use crate::display::report::{double_separator, separator};
use crate::display::{clean_payee, format_date, highlight, truncate};
use crate::error::{AgeError, AgeResult};
use crate::models::{Ledger, Money};
use crate::services::{AgeOfMoney, AgeOfMoneyService, AgeOptions, ProjectedAge};

const WIDTH: usize = 90;

/// Age of money for one budget at one point in time
#[derive(Debug, Clone)]
pub struct AgeOfMoneyReport {
    pub budget_name: String,
    pub as_of: NaiveDateTime,
    pub result: AgeOfMoney,
    /// How many of the latest spends the summary averages (and highlights)
    pub recent: usize,
    currency_symbol: String,
    date_format: String,
}

impl AgeOfMoneyReport {
    /// Generate the report from a ledger snapshot
    pub fn generate(
        ledger: &Ledger,
        budget_name: impl Into<String>,
        settings: &Settings,
        as_of: NaiveDateTime,
    ) -> AgeResult<Self> {
        let options = AgeOptions {
            include_scheduled_income: settings.include_scheduled_income,
            limits: settings.threshold_limits(),
        };
        let result = AgeOfMoneyService::with_options(ledger, options).compute(as_of)?;

        Ok(Self {
            budget_name: budget_name.into(),
            as_of,
            result,
            recent: settings.highlight_recent,
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    fn date(&self, date: chrono::NaiveDate) -> String {
        format_date(date, &self.date_format)
    }

    /// Format the report for terminal display.
    ///
    /// With `highlight_recent`, the ages of the last few spends are colored.
    pub fn format_terminal(&self, highlight_recent: bool) -> String {
        let mut output = String::new();
        let result = &self.result;

        output.push_str(&format!("Age of Money: {}\n", self.budget_name));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        match result.latest_age() {
            Some(age) => output.push_str(&format!("Latest age:        {:>10} days\n", age)),
            None => output.push_str("Latest age:               n/a\n"),
        }
        if let Some(avg) = result.recent_average_age(self.recent) {
            output.push_str(&format!(
                "Average (last {:>2}): {:>9} days\n",
                self.recent.min(result.realized.len()),
                avg
            ));
        }
        output.push_str(&format!("Earned:            {:>15}\n", self.money(result.total_earned)));
        output.push_str(&format!("Spent:             {:>15}\n", self.money(result.total_spent)));
        output.push_str(&format!("Unspent:           {:>15}\n", self.money(result.unspent)));
        output.push('\n');

        output.push_str("Spending\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:>4}  {:<12} {:<12} {:>12}  {:<20} {}\n",
            "Age", "Earned", "Spent", "Amount", "Account", "Payee"
        ));
        let highlight_from = result.realized.len().saturating_sub(self.recent);
        for (i, spend) in result.realized.iter().enumerate() {
            let age = format!("{:>4}", spend.age_days);
            let age = if highlight_recent && i >= highlight_from {
                highlight(&age)
            } else {
                age
            };
            output.push_str(&format!(
                "{}  {:<12} {:<12} {:>12}  {:<20} {}\n",
                age,
                self.date(spend.earned),
                self.date(spend.spent),
                self.money(spend.amount),
                truncate(&spend.account_name, 20),
                clean_payee(&spend.payee_name)
            ));
        }
        output.push('\n');

        output.push_str("Upcoming spending thresholds (and age if you spent today)\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for threshold in &result.thresholds {
            output.push_str(&format!(
                "{:>4}  {:<12} {:>15}  {:<20} {}\n",
                threshold.age_if_spent_today,
                self.date(threshold.bucket_date),
                self.money(threshold.cumulative),
                truncate(&threshold.account_name, 20),
                clean_payee(&threshold.payee_name)
            ));
        }

        if !result.projected.is_empty() {
            output.push('\n');
            output.push_str("Projected age of scheduled transactions\n");
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for spend in &result.projected {
                let (age, earned) = match spend.age {
                    ProjectedAge::Aged { age_days, earned } => {
                        (format!("{:>4}", age_days), self.date(earned))
                    }
                    ProjectedAge::NotEarnedYet => (" N/A".to_string(), "Not earned yet".to_string()),
                };
                output.push_str(&format!(
                    "{}  {:<14} {:<12} {:>12}  {:<20} {}\n",
                    age,
                    earned,
                    self.date(spend.spend_date),
                    self.money(spend.amount),
                    truncate(&spend.account_name, 20),
                    clean_payee(&spend.payee_name)
                ));
            }
        }

        output
    }

    /// Export every row of the report to CSV, one section column per table
    pub fn export_csv<W: Write>(&self, writer: W) -> AgeResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| AgeError::Export(e.to_string());

        out.write_record([
            "Section", "Age", "Earned", "Date", "Amount", "Account", "Payee",
        ])
        .map_err(export_err)?;

        for spend in &self.result.realized {
            out.write_record([
                "realized".to_string(),
                spend.age_days.to_string(),
                spend.earned.to_string(),
                spend.spent.to_string(),
                spend.amount.to_decimal_string(),
                spend.account_name.clone(),
                spend.payee_name.clone(),
            ])
            .map_err(export_err)?;
        }

        for threshold in &self.result.thresholds {
            out.write_record([
                "threshold".to_string(),
                threshold.age_if_spent_today.to_string(),
                threshold.bucket_date.to_string(),
                String::new(),
                threshold.cumulative.to_decimal_string(),
                threshold.account_name.clone(),
                threshold.payee_name.clone(),
            ])
            .map_err(export_err)?;
        }

        for spend in &self.result.projected {
            let (age, earned) = match spend.age {
                ProjectedAge::Aged { age_days, earned } => (age_days.to_string(), earned.to_string()),
                ProjectedAge::NotEarnedYet => (String::new(), String::new()),
            };
            out.write_record([
                "projected".to_string(),
                age,
                earned,
                spend.spend_date.to_string(),
                spend.amount.to_decimal_string(),
                spend.account_name.clone(),
                spend.payee_name.clone(),
            ])
            .map_err(export_err)?;
        }

        out.flush().map_err(|e| AgeError::Export(e.to_string()))?;
        Ok(())
    }
}
