use thiserror::Error;

use crate::types::Issuer;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unknown statement format: {filename}")]
    UnknownFormat { filename: String },

    #[error("no transactions extracted from {filename} ({issuer} layout)")]
    NothingExtracted { filename: String, issuer: Issuer },

    #[error("could not extract text from {filename}: {message}")]
    Pdf { filename: String, message: String },

    #[error("{filename}: {source}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
