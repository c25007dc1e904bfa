//! American Express (Delta SkyMiles) statement parser
//!
//! Two passes over the text:
//! 1. the "Payments ... Amount" block up to "New Charges", rows like
//!      02/03/25* MOBILE PAYMENT - THANK YOU                    -$512.40
//! 2. every `MM/DD/YY description $amount` row in the document, typed Purchase.
//!
//! Payment rows print `-$`, so the purchase pass does not pick them up again.

use anyhow::Result;
use ledgerlens_core::TxnKind;
use regex::Regex;

use super::RowBuilder;
use crate::types::{Extraction, Issuer};

pub fn parse_amex_text(text: &str, filename: &str) -> Result<Extraction> {
    let payments_block_re = Regex::new(r"(?s)Payments\s+Amount(?P<body>.*?)New Charges")?;
    let payment_re = Regex::new(concat!(
        r"(?P<date>\d{2}/\d{2}/\d{2})\*?\s+",
        r"(?P<desc>.+?)\s+",
        r"-\$(?P<amount>[\d,]+\.\d{2})"
    ))?;
    let purchase_re = Regex::new(concat!(
        r"(?P<date>\d{2}/\d{2}/\d{2})\s+",
        r"(?P<desc>.+?)\s+",
        r"\$(?P<amount>[\d,]+\.\d{2})"
    ))?;

    let rows = RowBuilder::new(Issuer::AmexCard, filename);
    let mut out = Extraction::new(Issuer::AmexCard);

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
