use ledgerlens_core::{CheckingSection, TxnKind};
use ledgerlens_ingest::{Issuer, StatementBatch, detect, extract_transactions};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture should exist")
}

/// Each fixture is routed to the expected issuer and yields the expected row count.
#[test]
fn test_fixture_detection_and_counts() {
    let cases = [
        ("pnc_virtual_wallet.txt", Issuer::PncChecking, 9),
        ("chase_checking.txt", Issuer::ChaseChecking, 5),
        ("chase_credit_card.txt", Issuer::ChaseCard, 5),
        ("discover.txt", Issuer::DiscoverCard, 4),
        ("amex_skymiles.txt", Issuer::AmexCard, 4),
        ("apple_card.txt", Issuer::AppleCard, 4),
        ("goldman_savings.txt", Issuer::GoldmanSavings, 3),
    ];

    for (name, issuer, count) in cases {
        let text = read(name);
        assert_eq!(detect(&text), Some(issuer), "{name}");

        let mut unknown = Vec::new();
        let ex = extract_transactions(&text, name, &mut unknown).unwrap();
        assert!(unknown.is_empty(), "{name}");
        assert_eq!(ex.len(), count, "{name}: {:?}", ex.transactions);
        assert!(ex.skipped.is_empty(), "{name}: {:?}", ex.skipped);
        assert!(
            ex.transactions.iter().all(|t| t.amount >= 0.0),
            "{name}: extracted amounts must be unsigned"
        );
        assert!(
            ex.transactions.iter().all(|t| t.source == issuer.bank_name()),
            "{name}"
        );
    }
}

#[test]
fn test_every_extracted_date_resolves() {
    for name in [
        "pnc_virtual_wallet.txt",
        "chase_checking.txt",
        "chase_credit_card.txt",
        "discover.txt",
        "amex_skymiles.txt",
        "apple_card.txt",
        "goldman_savings.txt",
    ] {
        let mut unknown = Vec::new();
        let ex = extract_transactions(&read(name), "Statement_Mar_31_2025.pdf", &mut unknown).unwrap();
        for t in &ex.transactions {
            assert!(t.date.is_resolved(), "{name}: {:?}", t.date);
        }
    }
}

#[test]
fn test_pnc_types_follow_sections() {
    let mut unknown = Vec::new();
    let ex = extract_transactions(
        &read("pnc_virtual_wallet.txt"),
        "Statement_Apr_30_2025.pdf",
        &mut unknown,
    )
    .unwrap();

    let deposits = ex
        .transactions
        .iter()
        .filter(|t| t.kind == TxnKind::Section(CheckingSection::Deposits))
        .count();
    assert_eq!(deposits, 3);
    assert_eq!(
        ex.transactions[0].description,
        "Direct Deposit - Payroll University Of Cinti PPD"
    );
    assert_eq!(ex.transactions[6].to_record()[2], "Online and Electronic Banking Deductions");
    assert_eq!(ex.transactions[6].amount, 1150.00);
}

#[test]
fn test_chase_checking_sign_becomes_type() {
    let mut unknown = Vec::new();
    let ex = extract_transactions(
        &read("chase_checking.txt"),
        "20250331-statements-7788-.pdf",
        &mut unknown,
    )
    .unwrap();

    let fedwire = ex
        .transactions
        .iter()
        .find(|t| t.description.starts_with("Fedwire"))
        .unwrap();
    assert_eq!(fedwire.kind, TxnKind::Credit);
    assert_eq!(fedwire.amount, 2500.00);

    let transfer = ex
        .transactions
        .iter()
        .find(|t| t.description.starts_with("Online Transfer"))
        .unwrap();
    assert_eq!(transfer.kind, TxnKind::Debit);
    assert_eq!(transfer.amount, 1000.00);
    assert_eq!(transfer.date.to_string(), "2025-03-20");
}

#[test]
fn test_unknown_fixture_goes_to_unknown_sink() {
    let mut unknown = Vec::new();
    let ex = extract_transactions(&read("unknown_newsletter.txt"), "mystery.pdf", &mut unknown).unwrap();
    assert!(ex.is_empty());
    assert_eq!(unknown, vec!["mystery.pdf".to_string()]);
}

#[test]
fn test_batch_over_fixture_files() {
    let mut batch = StatementBatch::new();
    for name in ["chase_credit_card.txt", "unknown_newsletter.txt", "discover.txt"] {
        batch.add_file(&fixture(name));
    }
    batch.add_file(&fixture("does_not_exist.txt"));

    assert_eq!(batch.transactions.len(), 9);
    assert_eq!(batch.unknown_files, vec!["unknown_newsletter.txt".to_string()]);
    assert_eq!(batch.failed.len(), 1);
    assert_eq!(batch.reports.len(), 3);
}

/// Detection order is strict: a statement carrying the card-summary phrases is read by
/// the Chase card parser even if it also names another issuer.
#[test]
fn test_card_summary_phrases_take_priority_over_amex() {
    let text = format!("New Balance $10.00\nPayment Due Date 03/25/25\n{}", read("amex_skymiles.txt"));
    assert_eq!(detect(&text), Some(Issuer::ChaseCard));
}
