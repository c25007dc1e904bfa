//! Chase (checking) statement parser (text)
//!
//! Expected extracted-text rows:
//!   TRANSACTION DETAIL
//!          DATE        DESCRIPTION                                     AMOUNT     BALANCE
//!          04/22       Discover     E-Payment 8148   Web ID: ...       -15.00      53.70
//!
//! A leading minus marks money leaving the account (Debit); everything else is a Credit.
//! The running balance column is optional and ignored.

use anyhow::Result;
use ledgerlens_core::TxnKind;
use regex::Regex;

use super::RowBuilder;
use crate::types::{Extraction, Issuer};

pub fn parse_chase_checking_text(text: &str, filename: &str) -> Result<Extraction> {
    // DATE DESCRIPTION AMOUNT [BALANCE]
    let txn_re = Regex::new(concat!(
        r"(?P<date>\d{2}/\d{2})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<amount>-?[\d,]+\.\d{2})",
        r"(?:\s+[\d,]+\.\d{2})?"
    ))?;

    let rows = RowBuilder::new(Issuer::ChaseChecking, filename);
    let mut out = Extraction::new(Issuer::ChaseChecking);

    for caps in txn_re.captures_iter(text) {
        let amount = &caps["amount"];
        let kind = if amount.starts_with('-') {
            TxnKind::Debit
        } else {
            TxnKind::Credit
        };
        out.push(rows.row(&caps[0], &caps["date"], amount, kind, &caps["desc"]));
    }

    Ok(out)
}
