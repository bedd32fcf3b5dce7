//! The root value handed to the template engine.

use serde::Serialize;

use crate::shape::Shaped;

/// Everything the ingestion layer can produce as template context.
///
/// Serializes transparently: a table as a list of lists or list of maps,
/// JSON as the decoded document, and `Empty` as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dot {
    /// Split, line-captured or CSV input.
    Table(Shaped),
    /// A decoded JSON document.
    Json(serde_json::Value),
    /// No input was read.
    Empty,
}

impl Dot {
    /// Converts into a plain JSON value.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Dot::Json(value) => value,
            Dot::Empty => serde_json::Value::Null,
            Dot::Table(Shaped::ListOfLists(rows)) => serde_json::Value::Array(
                rows.into_iter()
                    .map(|row| row.into_iter().map(serde_json::Value::String).collect())
                    .collect(),
            ),
            Dot::Table(Shaped::ListOfMaps(rows)) => serde_json::Value::Array(
                rows.into_iter()
                    .map(|row| {
                        serde_json::Value::Object(
                            row.iter()
                                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

impl From<Shaped> for Dot {
    fn from(shaped: Shaped) -> Self {
        Dot::Table(shaped)
    }
}

impl From<serde_json::Value> for Dot {
    fn from(value: serde_json::Value) -> Self {
        Dot::Json(value)
    }
}
