//! Normalized transaction types shared by every statement profile

use serde::{Deserialize, Serialize};

/// Money-flow direction of a statement entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }
}

/// Which statement format produced a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceType {
    #[serde(rename = "credit_card")]
    CreditCard,
    #[serde(rename = "debit_upi")]
    DebitUpi,
}

/// Fixed category set the classifier is allowed to assign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "grocery")]
    Grocery,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "electricity bill")]
    ElectricityBill,
    #[serde(rename = "phone/wifi bill")]
    PhoneWifiBill,
    #[serde(rename = "gas bill")]
    GasBill,
    #[serde(rename = "medicines")]
    Medicines,
    #[serde(rename = "sibling education")]
    SiblingEducation,
    #[serde(rename = "dependents")]
    Dependents,
    #[serde(rename = "eating out")]
    EatingOut,
    #[serde(rename = "entertainment")]
    Entertainment,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "house maintenance")]
    HouseMaintenance,
    #[serde(rename = "cash withdrawal")]
    CashWithdrawal,
    #[serde(rename = "debt")]
    Debt,
    #[serde(rename = "misc")]
    Misc,
    #[serde(rename = "invested")]
    Invested,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Grocery,
        Category::Transport,
        Category::ElectricityBill,
        Category::PhoneWifiBill,
        Category::GasBill,
        Category::Medicines,
        Category::SiblingEducation,
        Category::Dependents,
        Category::EatingOut,
        Category::Entertainment,
        Category::Shopping,
        Category::HouseMaintenance,
        Category::CashWithdrawal,
        Category::Debt,
        Category::Misc,
        Category::Invested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Grocery => "grocery",
            Category::Transport => "transport",
            Category::ElectricityBill => "electricity bill",
            Category::PhoneWifiBill => "phone/wifi bill",
            Category::GasBill => "gas bill",
            Category::Medicines => "medicines",
            Category::SiblingEducation => "sibling education",
            Category::Dependents => "dependents",
            Category::EatingOut => "eating out",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::HouseMaintenance => "house maintenance",
            Category::CashWithdrawal => "cash withdrawal",
            Category::Debt => "debt",
            Category::Misc => "misc",
            Category::Invested => "invested",
        }
    }

    /// Look up a category by its wire label (lowercased, trimmed).
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim().to_lowercase();
        Category::ALL.iter().copied().find(|c| c.as_str() == label)
    }
}

/// A normalized, deduplicatable statement entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date exactly as printed on the statement (format varies by profile)
    pub date: String,
    /// Non-negative magnitude of money moved, two fractional digits
    pub amount: f64,
    pub direction: Direction,
    /// Whitespace-normalized narration
    pub merchant: String,
    pub description: String,
    pub source: SourceType,
    /// Filled post-hoc by the classifier; absent on creation
    pub category: Option<Category>,
    /// Destination label, assigned by the orchestrating caller
    #[serde(rename = "monthSheet")]
    pub month_sheet: String,
    /// Content hash over the profile's identity fields; the idempotency key
    pub fingerprint: String,
    /// When this record was parsed, not when the transaction happened
    #[serde(rename = "importedAt")]
    pub imported_at: String,
}

/// Parse a statement amount like `2,500.00`.
///
/// Thousands separators are stripped; the convention is fixed, not
/// locale-detected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse().ok()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
