//! Per-issuer statement text parsers.
//!
//! Every parser takes the full statement text plus the source filename (bare `MM/DD`
//! dates borrow their year from it) and returns an [`Extraction`]. A row that matches
//! the layout but cannot be read is recorded as skipped; it never aborts the file.

pub mod amex;
pub mod apple_card;
pub mod chase_card;
pub mod chase_checking;
pub mod discover;
pub mod goldman_savings;
pub mod pnc_checking;

use anyhow::Result;
use ledgerlens_core::{Transaction, TxnKind, dates};
use tracing::debug;

use crate::types::{Extraction, Issuer, LineOutcome, SkipReason, Skipped};

pub use amex::parse_amex_text;
pub use apple_card::parse_apple_card_text;
pub use chase_card::parse_chase_card_text;
pub use chase_checking::parse_chase_checking_text;
pub use discover::parse_discover_text;
pub use goldman_savings::parse_goldman_savings_text;
pub use pnc_checking::parse_pnc_checking_text;

impl Issuer {
    /// Run this issuer's parser over a statement.
    pub fn extract(&self, text: &str, filename: &str) -> Result<Extraction> {
        match self {
            Issuer::PncChecking => parse_pnc_checking_text(text, filename),
            Issuer::ChaseCard => parse_chase_card_text(text, filename),
            Issuer::ChaseChecking => parse_chase_checking_text(text, filename),
            Issuer::DiscoverCard => parse_discover_text(text, filename),
            Issuer::AmexCard => parse_amex_text(text, filename),
            Issuer::AppleCard => parse_apple_card_text(text, filename),
            Issuer::GoldmanSavings => parse_goldman_savings_text(text, filename),
        }
    }
}

/// Collapse every whitespace run (including newlines) to a single space.
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a printed amount into its magnitude: drops thousands separators, `$` and sign.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ',' | '$')).collect();
    cleaned
        .trim()
        .trim_start_matches('-')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(f64::abs)
}

/// Builds transactions for one issuer and one source file.
pub(crate) struct RowBuilder<'a> {
    issuer: Issuer,
    filename: &'a str,
}

impl<'a> RowBuilder<'a> {
    pub(crate) fn new(issuer: Issuer, filename: &'a str) -> Self {
        Self { issuer, filename }
    }

    pub(crate) fn row(
        &self,
        excerpt: &str,
        raw_date: &str,
        raw_amount: &str,
        kind: TxnKind,
        raw_description: &str,
    ) -> LineOutcome {
        let skip = |reason: SkipReason| {
            debug!(issuer = %self.issuer, %reason, "skipping row");
            LineOutcome::Skipped(Skipped {
                excerpt: collapse_whitespace(excerpt),
                reason,
            })
        };

        let Some(amount) = parse_amount(raw_amount) else {
            return skip(SkipReason::InvalidAmount(raw_amount.trim().to_string()));
        };
        let description = collapse_whitespace(raw_description);
        if description.is_empty() {
            return skip(SkipReason::EmptyDescription);
        }

        let date = dates::resolve(raw_date.trim(), self.filename);
        LineOutcome::Parsed(Transaction::new(
            date,
            amount,
            kind,
            description,
            self.issuer.bank_name(),
        ))
    }
}
