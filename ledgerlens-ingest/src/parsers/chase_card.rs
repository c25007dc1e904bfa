//! Chase credit card statement parser
//!
//! ACCOUNT ACTIVITY rows after PDF-to-text:
//!   03/12     AMAZON.COM*ABC123 AMZN.COM/BILL WA     42.17
//!
//! This section only lists purchases; credits are not broken out, so every row is a
//! Purchase.

use anyhow::Result;
use ledgerlens_core::TxnKind;
use regex::Regex;

use super::RowBuilder;
use crate::types::{Extraction, Issuer};

pub fn parse_chase_card_text(text: &str, filename: &str) -> Result<Extraction> {
    let txn_re = Regex::new(concat!(
        r"^(?P<date>\d{2}/\d{2})\s+",
        r"(?P<desc>.*?)\s+",
        r"(?P<amount>[\d,]+\.\d{2})$"
    ))?;

    let rows = RowBuilder::new(Issuer::ChaseCard, filename);
    let mut out = Extraction::new(Issuer::ChaseCard);

    for line in text.lines() {
        let line = line.trim();
        if let Some(caps) = txn_re.captures(line) {
            out.push(rows.row(
                line,
                &caps["date"],
                &caps["amount"],
                TxnKind::Purchase,
                &caps["desc"],
            ));
        }
    }

    Ok(out)
}
