//! Processing many statements in one run.

use ledgerlens_core::Transaction;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn};

use crate::error::IngestError;
use crate::input::{display_name, load_statement_text};
use crate::types::{Extraction, Issuer};

/// What happened to one file of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub issuer: Option<Issuer>,
    pub extracted: usize,
    pub skipped: usize,
}

/// Accumulates transactions across statements.
///
/// Unrecognized layouts land in `unknown_files`, recognized statements that yielded no
/// rows land in `empty_files`, and files that could not be read at all land in `failed`.
/// None of them stops the batch.
#[derive(Debug, Default)]
pub struct StatementBatch {
    pub transactions: Vec<Transaction>,
    pub unknown_files: Vec<String>,
    pub empty_files: Vec<(String, Issuer)>,
    pub failed: Vec<(String, String)>,
    pub reports: Vec<FileReport>,
}

impl StatementBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already-extracted statement text.
    pub fn add_text(&mut self, text: &str, filename: &str) -> anyhow::Result<&FileReport> {
        let Extraction {
            issuer,
            transactions,
            skipped,
        } = crate::extract_transactions(text, filename, &mut self.unknown_files)?;

        if let Some(issuer) = issuer.filter(|_| transactions.is_empty()) {
            warn!(file = %filename, %issuer, "nothing extracted");
            self.empty_files.push((filename.to_string(), issuer));
        }

        let report = FileReport {
            filename: filename.to_string(),
            issuer,
            extracted: transactions.len(),
            skipped: skipped.len(),
        };
        self.transactions.extend(transactions);
        self.reports.push(report);
        Ok(&self.reports[self.reports.len() - 1])
    }

    /// Load and add a statement file. Read failures are recorded, not returned.
    pub fn add_file(&mut self, path: &Path) -> Option<&FileReport> {
        let filename = display_name(path);
        let outcome = load_statement_text(path).and_then(|text| {
            self.add_text(&text, &filename)
                .map(|r| r.extracted)
                .map_err(IngestError::from)
        });
        match outcome {
            Ok(n) => {
                info!(file = %filename, extracted = n, "processed statement");
                self.reports.last()
            }
            Err(e) => {
                error!(file = %filename, error = %e, "failed to process statement");
                self.failed.push((filename, e.to_string()));
                None
            }
        }
    }

    /// Statements that contributed no rows, as the errors a single upload would get.
    pub fn rejections(&self) -> Vec<IngestError> {
        let unknown = self.unknown_files.iter().map(|f| IngestError::UnknownFormat {
            filename: f.clone(),
        });
        let empty = self
            .empty_files
            .iter()
            .map(|(f, issuer)| IngestError::NothingExtracted {
                filename: f.clone(),
                issuer: *issuer,
            });
        unknown.chain(empty).collect()
    }

    pub fn finish(&self) {
        if !self.unknown_files.is_empty() {
            warn!(files = ?self.unknown_files, "unknown formats");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collects_known_and_unknown() {
        let mut batch = StatementBatch::new();
        batch
            .add_text("New Balance\nPayment Due Date\n03/12 AMAZON.COM 42.17", "statement_2024.pdf")
            .unwrap();
        batch.add_text("nothing recognizable", "mystery.pdf").unwrap();

        assert_eq!(batch.transactions.len(), 1);
        assert_eq!(batch.unknown_files, vec!["mystery.pdf".to_string()]);
        assert_eq!(batch.reports.len(), 2);
        assert_eq!(batch.reports[0].issuer, Some(Issuer::ChaseCard));
        assert_eq!(batch.reports[1].issuer, None);
    }

    #[test]
    fn test_recognized_but_empty_statement_is_rejected() {
        let mut batch = StatementBatch::new();
        let report = batch
            .add_text("Chase.com statement with no rows", "empty.txt")
            .unwrap();
        assert_eq!(report.issuer, Some(Issuer::ChaseChecking));
        assert_eq!(report.extracted, 0);
        batch.add_text("Monthly newsletter", "unknown_newsletter.txt").unwrap();

        assert!(batch.transactions.is_empty());
        assert_eq!(
            batch.empty_files,
            vec![("empty.txt".to_string(), Issuer::ChaseChecking)]
        );

        let rejections = batch.rejections();
        assert_eq!(rejections.len(), 2);
        assert!(matches!(
            &rejections[0],
            IngestError::UnknownFormat { filename } if filename == "unknown_newsletter.txt"
        ));
        assert!(matches!(
            &rejections[1],
            IngestError::NothingExtracted { filename, issuer: Issuer::ChaseChecking }
                if filename == "empty.txt"
        ));
    }

    #[test]
    fn test_unreadable_file_is_recorded() {
        let mut batch = StatementBatch::new();
        assert!(batch.add_file(Path::new("/no/such/statement.txt")).is_none());
        assert_eq!(batch.failed.len(), 1);
        assert_eq!(batch.failed[0].0, "statement.txt");
        assert!(batch.unknown_files.is_empty());
    }
}
