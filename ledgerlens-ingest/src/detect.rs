//! Issuer detection by signature substrings.
//!
//! The checks run in a fixed order and the first hit wins. Several issuers share
//! words (every Apple Card statement also says "Goldman Sachs Bank USA"), so the
//! order is part of the contract.

use crate::types::Issuer;

pub fn detect(text: &str) -> Option<Issuer> {
    let has = |needle: &str| text.contains(needle);

    if has("Virtual Wallet") || has("PNC") {
        Some(Issuer::PncChecking)
    } else if has("New Balance") && has("Payment Due Date") {
        Some(Issuer::ChaseCard)
    } else if has("JPMorgan") || has("Chase.com") {
        Some(Issuer::ChaseChecking)
    } else if has("Discover") && has("Activity Period") {
        Some(Issuer::DiscoverCard)
    } else if has("American Express") && has("SkyMiles") {
        Some(Issuer::AmexCard)
    } else if has("Apple Card is issued by Goldman Sachs Bank USA") {
        Some(Issuer::AppleCard)
    } else if has("Goldman Sachs Bank USA") && has("Daily Cash Deposit") {
        Some(Issuer::GoldmanSavings)
    } else {
        None
    }
}
