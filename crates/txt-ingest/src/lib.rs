//! Input ingestion for `txt`.
//!
//! `txt-ingest` turns a raw input stream into the value a template is rendered
//! against. There are four ways to read input:
//!
//! - **Split** ([`pattern_split`]): records on a record-separator regex,
//!   fields on a field-separator regex, like awk.
//! - **Lines** ([`line_split`]): records on a separator, fields captured by
//!   one run of a line pattern per record.
//! - **CSV** ([`csv_parse`]): comma-separated values with quoting.
//! - **JSON** ([`json_parse`]): a single JSON document.
//!
//! Tables are combined with a header by [`shape`]: without a header every
//! record is a list of fields, with one every record is a map.
//!
//! ```rust
//! use txt_ingest::{pattern_split, HeaderSpec, RegexCache};
//!
//! let cache = RegexCache::new();
//! let header = HeaderSpec::parse("name,age");
//! let value = pattern_split(&cache, "\n", r"\s+", Some(&header), "ann 31\nbob 27\n").unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&value).unwrap(),
//!     serde_json::json!([{"name": "ann", "age": "31"}, {"name": "bob", "age": "27"}]),
//! );
//! ```
//!
//! All patterns are compiled through a [`RegexCache`] owned by the caller.

mod dot;
mod error;
mod header;
pub mod parse;
mod regex_cache;
mod shape;
pub mod source;

pub use dot::Dot;
pub use error::{IngestError, Result};
pub use header::HeaderSpec;
pub use parse::{
    csv_parse, ingest, json_parse, line_split, pattern_split, split_records, Format, SplitDefaults,
    DEFAULT_FIELD_SEPARATOR, DEFAULT_LINE_PATTERN, DEFAULT_RECORD_SEPARATOR,
};
pub use regex_cache::{CacheStats, RegexCache};
pub use shape::{shape, RawTable, Record, Row, Shaped};
pub use source::{read_file, read_stdin, MockStdin, RealStdin, StdinReader};
