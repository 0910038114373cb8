//! Error types for fqmer.
//!
//! Fatal conditions only: configuration problems surfaced before any I/O,
//! and resource failures that abort the run with no partial report.
//! Recoverable parse conditions (unverified separators, truncated fields)
//! are not errors; they are logged and counted by the reader instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in fqmer operations.
#[derive(Debug, Error)]
pub enum FqmerError {
    /// K-mer length must be at least 1.
    #[error("invalid k-mer length {k}: must be at least 1")]
    InvalidKmerLength { k: usize },

    /// Quality cutoff is outside the representable Phred+33 score range.
    #[error("invalid quality cutoff {cutoff}: must be at most {max}")]
    InvalidQualityCutoff { cutoff: u8, max: u8 },

    /// Failed to open the input file.
    #[error("failed to open input '{path}': {source}")]
    OpenInput {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to read from the input stream.
    #[error("failed to read input: {source}")]
    ReadInput {
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the count report.
    #[error("failed to write report: {source}")]
    WriteReport {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the JSON report.
    #[error("failed to serialize JSON report: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for FqmerError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}
