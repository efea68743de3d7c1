//! Money type for representing currency amounts
//!
//! Internally stores amounts in milliunits (i64, thousandths of the currency
//! unit), the same integer unit the budgeting API uses. All arithmetic is
//! exact; only display rounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Milliunits per whole currency unit
pub const MILLIUNITS_PER_UNIT: i64 = 1000;

/// Represents a monetary amount stored as milliunits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from milliunits
    ///
    /// # Examples
    /// ```
    /// use age_of_money::models::Money;
    /// let amount = Money::from_milliunits(10_500); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_milliunits(milliunits: i64) -> Self {
        Self(milliunits)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * MILLIUNITS_PER_UNIT)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in milliunits
    pub const fn milliunits(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Magnitude rounded half away from zero to hundredths
    const fn rounded_cents(&self) -> i64 {
        (self.0.abs() + 5) / 10
    }

    /// Format the magnitude as a plain decimal with two places ("10.50")
    pub fn to_decimal_string(&self) -> String {
        let cents = self.rounded_cents();
        let sign = if self.is_negative() && cents != 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let cents = self.rounded_cents();
        if self.is_negative() && cents != 0 {
            format!("-{}{}.{:02}", symbol, cents / 100, cents % 100)
        } else {
            format!("{}{}.{:02}", symbol, cents / 100, cents % 100)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        assert_eq!(Money::from_units(20_000).milliunits(), 20_000_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_milliunits(10_500)), "$10.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
        assert_eq!(format!("{}", Money::from_milliunits(-10_500)), "-$10.50");
        assert_eq!(format!("{}", Money::from_milliunits(50)), "$0.05");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Money::from_milliunits(12_345).to_string(), "$12.35");
        assert_eq!(Money::from_milliunits(-12_345).to_string(), "-$12.35");
        assert_eq!(Money::from_milliunits(12_344).to_string(), "$12.34");
        assert_eq!(Money::from_milliunits(-4).to_string(), "$0.00");
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:>8}", Money::from_milliunits(1_000)), "   $1.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_milliunits(40_000).to_decimal_string(), "40.00");
        assert_eq!(Money::from_milliunits(-2_000).to_decimal_string(), "-2.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_milliunits(1000);
        let b = Money::from_milliunits(500);

        assert_eq!((a + b).milliunits(), 1500);
        assert_eq!((a - b).milliunits(), 500);
        assert_eq!((-a).milliunits(), -1000);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_milliunits(100),
            Money::from_milliunits(200),
            Money::from_milliunits(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.milliunits(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_milliunits(-2000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "-2000");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
