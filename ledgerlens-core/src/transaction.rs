//! Transaction record types shared by the extractors, the store and the aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names of the flat transaction store, in record order.
pub const RECORD_HEADER: [&str; 5] = ["Date", "Amount", "Type", "Description", "Bank"];

/// A statement date after resolution.
///
/// `Unparsed` is the sentinel for a date string the resolver could not turn into a
/// calendar date. It is kept (so the row is not lost) but excluded from date-keyed
/// aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatementDate {
    Resolved(NaiveDate),
    Unparsed(String),
}

impl StatementDate {
    pub fn resolved(&self) -> Option<NaiveDate> {
        match self {
            StatementDate::Resolved(d) => Some(*d),
            StatementDate::Unparsed(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, StatementDate::Resolved(_))
    }

    /// Read a date back from a stored record (ISO first, then `MM/DD/YYYY`).
    pub fn from_stored(raw: &str) -> Self {
        let s = raw.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
            .map(StatementDate::Resolved)
            .unwrap_or_else(|_| StatementDate::Unparsed(raw.to_string()))
    }
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementDate::Resolved(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            StatementDate::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for StatementDate {
    fn from(s: String) -> Self {
        StatementDate::from_stored(&s)
    }
}

impl From<StatementDate> for String {
    fn from(d: StatementDate) -> Self {
        d.to_string()
    }
}

/// Section of a checking-account statement; rows are typed by the section they sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckingSection {
    Deposits,
    CardWithdrawals,
    ElectronicDeductions,
}

impl CheckingSection {
    pub const ALL: [CheckingSection; 3] = [
        CheckingSection::Deposits,
        CheckingSection::CardWithdrawals,
        CheckingSection::ElectronicDeductions,
    ];

    /// Section heading as printed on the statement.
    pub fn title(&self) -> &'static str {
        match self {
            CheckingSection::Deposits => "Deposits and Other Additions",
            CheckingSection::CardWithdrawals => "Banking/Debit Card Withdrawals and Purchases",
            CheckingSection::ElectronicDeductions => "Online and Electronic Banking Deductions",
        }
    }
}

/// Structural transaction type as printed by the issuer (not the spending category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TxnKind {
    Purchase,
    Credit,
    Debit,
    Payment,
    Section(CheckingSection),
}

impl TxnKind {
    pub fn label(&self) -> &'static str {
        match self {
            TxnKind::Purchase => "Purchase",
            TxnKind::Credit => "Credit",
            TxnKind::Debit => "Debit",
            TxnKind::Payment => "Payment",
            TxnKind::Section(s) => s.title(),
        }
    }
}

impl fmt::Display for TxnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TxnKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "Purchase" => Ok(TxnKind::Purchase),
            "Credit" => Ok(TxnKind::Credit),
            "Debit" => Ok(TxnKind::Debit),
            "Payment" => Ok(TxnKind::Payment),
            _ => CheckingSection::ALL
                .iter()
                .find(|sec| sec.title() == s)
                .map(|sec| TxnKind::Section(*sec))
                .ok_or_else(|| format!("unknown transaction type: {s}")),
        }
    }
}

impl TryFrom<String> for TxnKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TxnKind> for String {
    fn from(k: TxnKind) -> Self {
        k.label().to_string()
    }
}

/// One row extracted from one statement.
///
/// `amount` is always the unsigned magnitude printed on the statement; the sign is
/// decided later from the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: StatementDate,
    pub amount: f64,
    pub kind: TxnKind,
    pub description: String,
    /// Bank label of the issuer that produced the row (e.g. "Chase Credit Card")
    pub source: String,
}

impl Transaction {
    pub fn new(
        date: StatementDate,
        amount: f64,
        kind: TxnKind,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount: amount.abs(),
            kind,
            description: description.into(),
            source: source.into(),
        }
    }

    /// Store record: `[date, amount, type, description, bank]`.
    pub fn to_record(&self) -> [String; 5] {
        [
            self.date.to_string(),
            format!("{:.2}", self.amount),
            self.kind.label().to_string(),
            self.description.clone(),
            self.source.clone(),
        ]
    }
}
