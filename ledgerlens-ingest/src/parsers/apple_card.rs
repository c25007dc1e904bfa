//! Apple Card statement parser
//!
//! Payments block:
//!   Payments
//!   Date Description Amount
//!   12/10/2024 ACH Deposit Internet transfer from account ending in 1234 -$350.00
//!   Transactions
//!
//! Purchase rows print the Daily Cash percentage and amount before the charged amount:
//!   12/01/2024 UBER *TRIP HELP.UBER.COM 2% $0.36 $18.20
//!
//! The second dollar figure on a purchase row is the charged amount.

use anyhow::Result;
use ledgerlens_core::TxnKind;
use regex::Regex;

use super::RowBuilder;
use crate::types::{Extraction, Issuer};

pub fn parse_apple_card_text(text: &str, filename: &str) -> Result<Extraction> {
    let payments_block_re =
        Regex::new(r"(?s)Payments\s+Date Description Amount(?P<body>.*?)Transactions")?;
    let payment_re = Regex::new(concat!(
        r"(?P<date>\d{2}/\d{2}/\d{4})\s+",
        r"(?P<desc>.+?)\s+",
        r"-\$(?P<amount>[\d,]+\.\d{2})"
    ))?;
    // Purchase rows stay on one line
    let purchase_re = Regex::new(concat!(
        r"(?P<date>\d{2}/\d{2}/\d{4})[ \t]+",
        r"(?P<desc>.+?)[ \t]+",
        r"\$[\d,]+\.\d{2}[ \t]+",
        r"\$(?P<amount>[\d,]+\.\d{2})"
    ))?;

    let rows = RowBuilder::new(Issuer::AppleCard, filename);
    let mut out = Extraction::new(Issuer::AppleCard);

    if let Some(block) = payments_block_re.captures(text) {
        let body = block.name("body").map_or("", |m| m.as_str());
        for caps in payment_re.captures_iter(body) {
            out.push(rows.row(
                &caps[0],
                &caps["date"],
                &caps["amount"],
                TxnKind::Payment,
                &caps["desc"],
            ));
        }
    }

    for caps in purchase_re.captures_iter(text) {
        out.push(rows.row(
            &caps[0],
            &caps["date"],
            &caps["amount"],
            TxnKind::Purchase,
            &caps["desc"],
        ));
    }

    Ok(out)
}
