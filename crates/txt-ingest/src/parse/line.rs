//! Records split on a separator, fields captured by a line pattern.

use crate::error::Result;
use crate::header::HeaderSpec;
use crate::parse::split::split_records;
use crate::regex_cache::RegexCache;
use crate::shape::{shape, RawTable, Shaped};

/// Splits `input` into records on `rs`, then runs `lp` once against each record.
///
/// - With capture groups, the fields are the group values in declaration
///   order (a group that did not participate yields `""`).
/// - Without groups, the single field is the whole match.
/// - A record the pattern does not match has no fields but is still kept.
///
/// With [`HeaderSpec::FromInput`], a pattern that has named groups supplies
/// the header from its group names (unnamed groups get `""`); otherwise the
/// result is a list of lists.
pub fn line_split(
    cache: &RegexCache,
    rs: &str,
    lp: &str,
    header: Option<&HeaderSpec>,
    input: &str,
) -> Result<Shaped> {
    let records = split_records(cache, rs, input)?;
    let pattern = cache.compile(lp)?;
    let groups = pattern.captures_len() - 1;

    let table: RawTable = records
        .into_iter()
        .map(|record| match pattern.captures(record) {
            None => Vec::new(),
            Some(caps) if groups == 0 => vec![caps[0].to_string()],
            Some(caps) => (1..=groups)
                .map(|i| caps.get(i).map_or("", |m| m.as_str()).to_string())
                .collect(),
        })
        .collect();
    tracing::debug!(records = table.len(), rs, lp, "captured lines");

    Ok(match header {
        None => Shaped::ListOfLists(table),
        Some(HeaderSpec::Names(names)) => shape(table, Some(names)),
        Some(HeaderSpec::FromInput) => {
            if pattern.capture_names().flatten().next().is_some() {
                let names: Vec<String> = pattern
                    .capture_names()
                    .skip(1)
                    .map(|name| name.unwrap_or_default().to_string())
                    .collect();
                shape(table, Some(&names))
            } else {
                Shaped::ListOfLists(table)
            }
        }
    })
}
