//! Discover card statement parser
//!
//! Transaction rows carry both a transaction date and a post date:
//!   04/01/24  04/02/24  NETFLIX.COM 866-579-7172 CA          $ 15.99
//!   04/05/24  04/05/24  INTERNET PAYMENT - THANK YOU          $ -200.00
//!
//! A minus inside the amount marks a credit. The transaction date is the one kept.

use anyhow::Result;
use ledgerlens_core::TxnKind;
use regex::Regex;

use super::RowBuilder;
use crate::types::{Extraction, Issuer};

pub fn parse_discover_text(text: &str, filename: &str) -> Result<Extraction> {
    let txn_re = Regex::new(concat!(
        r"(?s)(?P<trans>\d{2}/\d{2}/\d{2})\s+",
        r"(?P<post>\d{2}/\d{2}/\d{2})\s+",
        r"(?P<desc>.+?)",
        r"\$\s*(?P<amount>-?[\d,]+\.\d{2})"
    ))?;

    let rows = RowBuilder::new(Issuer::DiscoverCard, filename);
    let mut out = Extraction::new(Issuer::DiscoverCard);

    for caps in txn_re.captures_iter(text) {
        let amount = &caps["amount"];
        let kind = if amount.contains('-') {
            TxnKind::Credit
        } else {
            TxnKind::Purchase
        };
        out.push(rows.row(&caps[0], &caps["trans"], amount, kind, &caps["desc"]));
    }

    Ok(out)
}
