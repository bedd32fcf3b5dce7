//! Record/field splitting on regular expressions, in the manner of awk.

use crate::error::{IngestError, Result};
use crate::header::HeaderSpec;
use crate::regex_cache::RegexCache;
use crate::shape::{shape, RawTable, Shaped};

/// Cuts `input` into records on the record separator pattern.
///
/// A single trailing empty record (input ending in a separator) is dropped,
/// so `"a\nb\n"` is two records. Interior empty records are kept.
///
/// # Errors
///
/// [`IngestError::EmptyRecordSeparator`] for an empty pattern, or
/// [`IngestError::Pattern`] if it does not compile.
pub fn split_records<'a>(cache: &RegexCache, rs: &str, input: &'a str) -> Result<Vec<&'a str>> {
    if rs.is_empty() {
        return Err(IngestError::EmptyRecordSeparator);
    }
    let separator = cache.compile(rs)?;
    let mut records: Vec<&str> = separator.split(input).collect();
    if records.last() == Some(&"") {
        records.pop();
    }
    Ok(records)
}

/// Splits `input` into records on `rs` and each record into fields on `fs`.
///
/// With no header the result is a list of lists. [`HeaderSpec::FromInput`]
/// takes the first record as the header; explicit names are applied as is.
pub fn pattern_split(
    cache: &RegexCache,
    rs: &str,
    fs: &str,
    header: Option<&HeaderSpec>,
    input: &str,
) -> Result<Shaped> {
    let records = split_records(cache, rs, input)?;
    let field_separator = cache.compile(fs)?;

    let mut table: RawTable = records
        .into_iter()
        .map(|record| field_separator.split(record).map(str::to_string).collect())
        .collect();
    tracing::debug!(records = table.len(), rs, fs, "split input");

    Ok(match header {
        None => Shaped::ListOfLists(table),
        Some(HeaderSpec::Names(names)) => shape(table, Some(names)),
        Some(HeaderSpec::FromInput) => {
            if table.is_empty() {
                Shaped::ListOfMaps(Vec::new())
            } else {
                let names = table.remove(0);
                shape(table, Some(&names))
            }
        }
    })
}
