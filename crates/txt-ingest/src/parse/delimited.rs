//! CSV input.
//!
//! Decoding uses the `csv` crate with a flexible record length: rows whose
//! column count differs from the header are kept, and the shaper truncates
//! them. The `csv` reader accepts stray and unterminated quotes silently, so
//! the input is first checked for the quoting mistakes that should abort
//! the run.

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::header::HeaderSpec;
use crate::shape::{shape, RawTable, Shaped};

/// Decodes comma-separated input.
///
/// With [`HeaderSpec::FromInput`] the first decoded row is the header and is
/// not part of the result.
///
/// # Errors
///
/// [`IngestError::Csv`] for malformed quoting, [`IngestError::CsvDecode`] if
/// the reader fails. No partial value is returned.
pub fn csv_parse(header: &HeaderSpec, input: &str) -> Result<Shaped> {
    check_quoting(input)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut table: RawTable = Vec::new();
    for record in reader.records() {
        let record = record?;
        table.push(record.iter().map(str::to_string).collect());
    }
    tracing::debug!(records = table.len(), "decoded CSV");

    Ok(match header {
        HeaderSpec::Names(names) => shape(table, Some(names)),
        HeaderSpec::FromInput => {
            if table.is_empty() {
                Shaped::ListOfMaps(Vec::new())
            } else {
                let names = table.remove(0);
                shape(table, Some(&names))
            }
        }
    })
}

/// Rejects bare quotes in unquoted fields, characters after a closing quote,
/// and quoted fields that never close.
fn check_quoting(input: &str) -> Result<()> {
    let bytes = input.as_bytes();
    let mut line: u64 = 1;
    let mut field_start = true;
    let mut i = 0;

    while i < bytes.len() {
        if field_start && bytes[i] == b'"' {
            let opened_on = line;
            i += 1;
            loop {
                match bytes.get(i) {
                    None => {
                        return Err(IngestError::Csv {
                            line: opened_on,
                            message: "quoted field is never closed".into(),
                        })
                    }
                    Some(b'"') => match bytes.get(i + 1) {
                        Some(b'"') => i += 2,
                        None | Some(b',') | Some(b'\n') | Some(b'\r') => {
                            i += 1;
                            break;
                        }
                        Some(_) => {
                            return Err(IngestError::Csv {
                                line,
                                message: "extraneous `\"` in quoted field".into(),
                            })
                        }
                    },
                    Some(b'\n') => {
                        line += 1;
                        i += 1;
                    }
                    Some(_) => i += 1,
                }
            }
            field_start = false;
            continue;
        }

        match bytes[i] {
            b',' => field_start = true,
            b'\n' => {
                line += 1;
                field_start = true;
            }
            b'"' => {
                return Err(IngestError::Csv {
                    line,
                    message: "bare `\"` in non-quoted field".into(),
                })
            }
            _ => field_start = false,
        }
        i += 1;
    }
    Ok(())
}
