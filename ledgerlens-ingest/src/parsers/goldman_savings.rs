//! Goldman Sachs (Apple) savings statement parser
//!
//!   02/02/2025 Daily Cash Deposit $9.87
//!   02/28/2025 Interest Paid $14.02
//!
//! The statement only lists money coming in, so every row is a Credit. Rows are matched
//! within a line; the statement period header also carries dates.

use anyhow::Result;
use ledgerlens_core::TxnKind;
use regex::Regex;

use super::RowBuilder;
use crate::types::{Extraction, Issuer};

pub fn parse_goldman_savings_text(text: &str, filename: &str) -> Result<Extraction> {
    let txn_re = Regex::new(concat!(
        r"(?P<date>\d{2}/\d{2}/\d{4})[ \t]+",
        r"(?P<desc>.*?)[ \t]+",
        r"\$(?P<amount>[\d,]+\.\d{2})"
    ))?;

    let rows = RowBuilder::new(Issuer::GoldmanSavings, filename);
    let mut out = Extraction::new(Issuer::GoldmanSavings);

    for caps in txn_re.captures_iter(text) {
        out.push(rows.row(
            &caps[0],
            &caps["date"],
            &caps["amount"],
            TxnKind::Credit,
            &caps["desc"],
        ));
    }

    Ok(out)
}
