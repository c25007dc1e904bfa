use ledgerlens_core::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement layouts we know how to read. Each one is bound to exactly one extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issuer {
    PncChecking,
    ChaseCard,
    ChaseChecking,
    DiscoverCard,
    AmexCard,
    AppleCard,
    GoldmanSavings,
}

impl Issuer {
    /// Detection priority order.
    pub const ALL: [Issuer; 7] = [
        Issuer::PncChecking,
        Issuer::ChaseCard,
        Issuer::ChaseChecking,
        Issuer::DiscoverCard,
        Issuer::AmexCard,
        Issuer::AppleCard,
        Issuer::GoldmanSavings,
    ];

    /// Label written to the `Bank` column.
    pub fn bank_name(&self) -> &'static str {
        match self {
            Issuer::PncChecking => "PNC",
            Issuer::ChaseCard => "Chase Credit Card",
            Issuer::ChaseChecking => "Chase",
            Issuer::DiscoverCard => "Discover",
            Issuer::AmexCard => "American Express",
            Issuer::AppleCard => "Apple Card",
            Issuer::GoldmanSavings => "Goldman Sachs Savings",
        }
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bank_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    InvalidAmount(String),
    EmptyDescription,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidAmount(raw) => write!(f, "invalid amount '{raw}'"),
            SkipReason::EmptyDescription => f.write_str("empty description"),
        }
    }
}

/// A matched row that could not be turned into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    /// Text the row pattern matched, whitespace-collapsed
    pub excerpt: String,
    pub reason: SkipReason,
}

/// Result of reading a single matched row.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed(Transaction),
    Skipped(Skipped),
}

/// Everything one extractor produced from one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// `None` when no issuer signature matched
    pub issuer: Option<Issuer>,
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<Skipped>,
}

impl Extraction {
    pub fn new(issuer: Issuer) -> Self {
        Self {
            issuer: Some(issuer),
            ..Self::default()
        }
    }

    pub fn unrecognized() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Parsed(t) => self.transactions.push(t),
            LineOutcome::Skipped(s) => self.skipped.push(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}
