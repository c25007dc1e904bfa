//! ledgerlens-ingest: statement text ingestion, issuer detection and bank-specific parsers.

pub mod batch;
pub mod detect;
pub mod error;
pub mod input;
pub mod parsers;
pub mod types;

use tracing::{info, warn};

pub use batch::{FileReport, StatementBatch};
pub use detect::detect;
pub use error::IngestError;
pub use types::{Extraction, Issuer, LineOutcome, SkipReason, Skipped};

/// Detect the statement layout and run its parser.
///
/// An unrecognized layout is not an error: `filename` is appended to `unknown_files`
/// and an empty extraction comes back.
pub fn extract_transactions(
    text: &str,
    filename: &str,
    unknown_files: &mut Vec<String>,
) -> anyhow::Result<Extraction> {
    let Some(issuer) = detect(text) else {
        warn!(file = %filename, "unknown statement format");
        unknown_files.push(filename.to_string());
        return Ok(Extraction::unrecognized());
    };

    info!(file = %filename, %issuer, "matched extractor");
    let extraction = issuer.extract(text, filename)?;
    for skip in &extraction.skipped {
        warn!(file = %filename, row = %skip.excerpt, reason = %skip.reason, "skipped row");
    }
    Ok(extraction)
}

/// Single-upload entry point: like [`extract_transactions`], but an unknown layout or
/// an empty result is reported as an error so the caller can reject the upload.
pub fn ingest_statement(text: &str, filename: &str) -> error::Result<Extraction> {
    let mut unknown = Vec::new();
    let extraction = extract_transactions(text, filename, &mut unknown)?;
    match extraction.issuer {
        None => Err(IngestError::UnknownFormat {
            filename: filename.to_string(),
        }),
        Some(issuer) if extraction.is_empty() => Err(IngestError::NothingExtracted {
            filename: filename.to_string(),
            issuer,
        }),
        Some(_) => Ok(extraction),
    }
}
