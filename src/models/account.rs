//! Account model
//!
//! Represents budget accounts (checking, savings, credit cards, loans, etc.)
//! as they appear in a budget snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Checking,
    Savings,
    Cash,
    CreditCard,
    LineOfCredit,
    OtherAsset,
    OtherLiability,
    Mortgage,
    AutoLoan,
    StudentLoan,
    PersonalLoan,
    MedicalDebt,
    OtherDebt,
    /// Any account type this tool does not know about yet
    #[serde(other)]
    Other,
}

impl AccountType {
    /// Returns true if this account type represents real cash holdings
    pub fn is_cash_backed(&self) -> bool {
        matches!(self, Self::Cash | Self::Checking | Self::Savings)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', ' '], "").as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "cash" => Some(Self::Cash),
            "creditcard" | "credit" => Some(Self::CreditCard),
            "lineofcredit" | "loc" => Some(Self::LineOfCredit),
            "otherasset" => Some(Self::OtherAsset),
            "otherliability" => Some(Self::OtherLiability),
            "mortgage" => Some(Self::Mortgage),
            "autoloan" => Some(Self::AutoLoan),
            "studentloan" => Some(Self::StudentLoan),
            "personalloan" => Some(Self::PersonalLoan),
            "medicaldebt" => Some(Self::MedicalDebt),
            "otherdebt" => Some(Self::OtherDebt),
            _ => None,
        }
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::Checking
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::LineOfCredit => "Line of Credit",
            Self::OtherAsset => "Other Asset",
            Self::OtherLiability => "Other Liability",
            Self::Mortgage => "Mortgage",
            Self::AutoLoan => "Auto Loan",
            Self::StudentLoan => "Student Loan",
            Self::PersonalLoan => "Personal Loan",
            Self::MedicalDebt => "Medical Debt",
            Self::OtherDebt => "Other Debt",
            Self::Other => "Other",
        };
        f.pad(name)
    }
}

/// A budget account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Chase Checking")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Whether this account is included in the budget
    /// Off-budget (tracking) accounts never age money
    pub on_budget: bool,

    #[serde(default)]
    pub closed: bool,

    #[serde(default)]
    pub note: Option<String>,

    /// Current balance as reported by the snapshot
    #[serde(default)]
    pub balance: Money,

    /// Payee used when other accounts transfer into this one
    #[serde(default)]
    pub transfer_payee_id: Option<String>,

    #[serde(default)]
    pub deleted: bool,
}

impl Account {
    /// Create a new on-budget account with default values
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            on_budget: true,
            closed: false,
            note: None,
            balance: Money::zero(),
            transfer_payee_id: None,
            deleted: false,
        }
    }

    /// Create a new off-budget (tracking) account
    pub fn tracking(name: impl Into<String>, account_type: AccountType) -> Self {
        let mut account = Self::new(name, account_type);
        account.on_budget = false;
        account
    }

    /// True iff the account holds real cash (cash, checking or savings)
    pub fn is_cash_backed(&self) -> bool {
        self.account_type.is_cash_backed()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}
