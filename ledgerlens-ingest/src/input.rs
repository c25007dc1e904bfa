//! Turning an uploaded file into statement text.

use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Name used for a statement in logs, unknown-file lists and year inference.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Files a directory scan picks up: PDFs and already-extracted `.txt` statements.
pub fn is_statement_file(path: &Path) -> bool {
    is_pdf(path)
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Read a statement: PDFs go through text extraction, anything else is read as UTF-8 text.
pub fn load_statement_text(path: &Path) -> Result<String> {
    let filename = display_name(path);
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        filename: filename.clone(),
        source,
    })?;

    if is_pdf(path) {
        pdf_text(&bytes, &filename)
    } else {
        String::from_utf8(bytes).map_err(|e| IngestError::Io {
            filename,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }
}

/// Text layer of a PDF, pages joined by newlines.
#[cfg(feature = "pdf")]
pub fn pdf_text(bytes: &[u8], filename: &str) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| IngestError::Pdf {
        filename: filename.to_string(),
        message: e.to_string(),
    })
}

#[cfg(not(feature = "pdf"))]
pub fn pdf_text(_bytes: &[u8], filename: &str) -> Result<String> {
    Err(IngestError::Pdf {
        filename: filename.to_string(),
        message: "built without the `pdf` feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_statement_file_filter() {
        assert!(is_statement_file(&PathBuf::from("a/Statement.PDF")));
        assert!(is_statement_file(&PathBuf::from("a/statement.txt")));
        assert!(!is_statement_file(&PathBuf::from("a/account.csv")));
        assert_eq!(display_name(&PathBuf::from("/tmp/x/mystery.pdf")), "mystery.pdf");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_statement_text(&PathBuf::from("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_garbage_pdf_is_a_pdf_error() {
        let err = pdf_text(b"not a pdf at all", "junk.pdf").unwrap_err();
        assert!(matches!(err, IngestError::Pdf { .. }));
    }
}
