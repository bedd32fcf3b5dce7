//! The four input splitters and the mode that selects between them.

mod delimited;
mod document;
mod line;
mod split;

pub use delimited::csv_parse;
pub use document::json_parse;
pub use line::line_split;
pub use split::{pattern_split, split_records};

use crate::dot::Dot;
use crate::error::Result;
use crate::header::HeaderSpec;
use crate::regex_cache::RegexCache;

/// Default record separator: one record per line.
pub const DEFAULT_RECORD_SEPARATOR: &str = "\n";

/// Default field separator: runs of whitespace.
pub const DEFAULT_FIELD_SEPARATOR: &str = r"\s+";

/// Default line pattern: the whole record as one captured field.
pub const DEFAULT_LINE_PATTERN: &str = "^(.*)$";

/// Effective RS/FS/LP for a run.
///
/// Template functions that receive an empty separator or pattern argument
/// fall back to these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDefaults {
    pub record_separator: String,
    pub field_separator: String,
    pub line_pattern: String,
}

impl Default for SplitDefaults {
    fn default() -> Self {
        Self {
            record_separator: DEFAULT_RECORD_SEPARATOR.to_string(),
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            line_pattern: DEFAULT_LINE_PATTERN.to_string(),
        }
    }
}

impl SplitDefaults {
    /// `given` unless empty, else the default record separator.
    pub fn record_separator<'a>(&'a self, given: &'a str) -> &'a str {
        or_default(given, &self.record_separator)
    }

    /// `given` unless empty, else the default field separator.
    pub fn field_separator<'a>(&'a self, given: &'a str) -> &'a str {
        or_default(given, &self.field_separator)
    }

    /// `given` unless empty, else the default line pattern.
    pub fn line_pattern<'a>(&'a self, given: &'a str) -> &'a str {
        or_default(given, &self.line_pattern)
    }
}

fn or_default<'a>(given: &'a str, default: &'a str) -> &'a str {
    if given.is_empty() {
        default
    } else {
        given
    }
}

/// How the primary input is turned into the root value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// Records on `rs`, fields on `fs`.
    Split {
        rs: String,
        fs: String,
        header: Option<HeaderSpec>,
    },
    /// Records on `rs`, fields captured by `lp`.
    Lines {
        rs: String,
        lp: String,
        header: Option<HeaderSpec>,
    },
    /// Comma-separated values.
    Csv { header: HeaderSpec },
    /// A single JSON document.
    Json,
}

impl Format {
    /// Short name for logs and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Split { .. } => "split",
            Format::Lines { .. } => "lines",
            Format::Csv { .. } => "csv",
            Format::Json => "json",
        }
    }
}

/// Parses `input` according to `format`.
pub fn ingest(cache: &RegexCache, format: &Format, input: &str) -> Result<Dot> {
    tracing::debug!(format = format.name(), bytes = input.len(), "ingesting input");
    Ok(match format {
        Format::Split { rs, fs, header } => {
            Dot::Table(pattern_split(cache, rs, fs, header.as_ref(), input)?)
        }
        Format::Lines { rs, lp, header } => {
            Dot::Table(line_split(cache, rs, lp, header.as_ref(), input)?)
        }
        Format::Csv { header } => Dot::Table(csv_parse(header, input)?),
        Format::Json => Dot::Json(json_parse(input)?),
    })
}
