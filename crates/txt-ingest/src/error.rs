//! Error types for input ingestion.

use std::io;

use thiserror::Error;

/// Errors that can occur while compiling patterns or decoding input.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A record separator, field separator or line pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The record separator was the empty pattern.
    #[error("empty record separator")]
    EmptyRecordSeparator,

    /// Quoting in the CSV input is malformed.
    #[error("malformed CSV on line {line}: {message}")]
    Csv { line: u64, message: String },

    /// The CSV reader could not decode a record.
    #[error("malformed CSV: {0}")]
    CsvDecode(#[from] csv::Error),

    /// The JSON input could not be decoded.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An input source could not be read.
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl IngestError {
    /// Create a pattern error for the given source text.
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a read error naming the source that failed.
    pub fn read(name: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            name: name.into(),
            source,
        }
    }

    /// Whether this error belongs to the malformed-input (CSV/JSON) class.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Csv { .. } | Self::CsvDecode(_) | Self::Json(_))
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
