//! PNC Virtual Wallet (checking) statement parser
//!
//! The activity detail is split into three sections, each with its own column header:
//!   Deposits and Other Additions
//!   Date Amount Description
//!   04/01 1,250.00 Direct Deposit - Payroll ACME
//!   04/03 75.00 Zelle From Jane Doe
//!   Banking/Debit Card Withdrawals and Purchases
//!   ...
//!
//! A description may wrap onto following lines; an entry runs until the next line that
//! starts with a date, or the end of its section.

use anyhow::Result;
use ledgerlens_core::{CheckingSection, TxnKind};
use regex::Regex;

use super::RowBuilder;
use crate::types::{Extraction, Issuer};

fn section_pattern(section: CheckingSection) -> &'static str {
    match section {
        CheckingSection::Deposits => concat!(
            r"(?s)Deposits and Other Additions.*?Date Amount Description",
            r"(?P<body>.*?)Banking/Debit Card Withdrawals"
        ),
        CheckingSection::CardWithdrawals => concat!(
            r"(?s)Banking/Debit Card Withdrawals.*?Date Amount Description",
            r"(?P<body>.*?)Online and Electronic Banking Deductions"
        ),
        CheckingSection::ElectronicDeductions => concat!(
            r"(?s)Online and Electronic Banking Deductions.*?Date Amount Description",
            r"(?P<body>.*?)(?:Daily Balance|Page \d+ of \d+)"
        ),
    }
}

/// Split a section body into entry chunks, one per date-led line.
fn entry_chunks<'a>(body: &'a str, line_start_re: &Regex) -> Vec<&'a str> {
    let mut starts: Vec<usize> = vec![0];
    starts.extend(line_start_re.find_iter(body).map(|m| m.start() + 1));
    starts.push(body.len());
    starts
        .windows(2)
        .map(|w| &body[w[0]..w[1]])
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

pub fn parse_pnc_checking_text(text: &str, filename: &str) -> Result<Extraction> {
    let line_start_re = Regex::new(r"\n\d{2}/\d{2}")?;
    let entry_re = Regex::new(concat!(
        r"(?s)(?P<date>\d{2}/\d{2})\s+",
        r"(?P<amount>[\d,.]+)\s+",
        r"(?P<desc>.+)"
    ))?;

    let rows = RowBuilder::new(Issuer::PncChecking, filename);
    let mut out = Extraction::new(Issuer::PncChecking);

    for section in CheckingSection::ALL {
        let section_re = Regex::new(section_pattern(section))?;
        let Some(caps) = section_re.captures(text) else {
            continue;
        };
        let body = caps.name("body").map_or("", |m| m.as_str());

        for chunk in entry_chunks(body, &line_start_re) {
            let Some(entry) = entry_re.captures(chunk) else {
                continue;
            };
            out.push(rows.row(
                &entry[0],
                &entry["date"],
                &entry["amount"],
                TxnKind::Section(section),
                &entry["desc"],
            ));
        }
    }

    Ok(out)
}
