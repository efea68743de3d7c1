//! Report formatting utilities for terminal output

use chrono::NaiveDate;

use crate::models::Money;

/// 256-color red used to mark the most recent spends
const HIGHLIGHT: &str = "\x1b[38;5;160m";
const RESET: &str = "\x1b[0m";

/// Wrap already-padded text in the highlight color
pub fn highlight(text: &str) -> String {
    format!("{}{}{}", HIGHLIGHT, text, RESET)
}

/// Tidy the payee names the budgeting app gives transfers
pub fn clean_payee(payee: &str) -> String {
    payee.replace(" : ", ": ").replace("Transfer :", "Transfer:")
}

/// Format a date with a strftime pattern, falling back to ISO on a bad pattern
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.to_string();
    }
    out
}

/// Money with a symbol and thousands separators ("$1,234.50")
pub fn format_grouped(amount: Money, symbol: &str) -> String {
    let plain = amount.abs().to_decimal_string();
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() && plain != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, grouped, cents)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "=".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_payee() {
        assert_eq!(clean_payee("Transfer : Savings"), "Transfer: Savings");
        assert_eq!(clean_payee("Corner Store"), "Corner Store");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(Money::from_milliunits(1_234_500), "$"), "$1,234.50");
        assert_eq!(format_grouped(Money::from_milliunits(999_990), "$"), "$999.99");
        assert_eq!(
            format_grouped(Money::from_milliunits(-12_345_678_000), "$"),
            "-$12,345,678.00"
        );
        assert_eq!(format_grouped(Money::zero(), "€"), "€0.00");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2019, 8, 3).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d"), "2019-08-03");
        assert_eq!(format_date(date, "%d/%m/%Y"), "03/08/2019");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_highlight_wraps_text() {
        assert_eq!(highlight(" 12"), "\x1b[38;5;160m 12\x1b[0m");
    }
}
