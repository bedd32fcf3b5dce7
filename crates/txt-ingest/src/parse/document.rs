//! JSON input.

use serde::Deserialize;
use serde_json::{Deserializer, Value};

use crate::error::Result;

/// Decodes the first JSON document in `input`. Anything after it is ignored.
///
/// # Errors
///
/// [`IngestError::Json`](crate::IngestError::Json) if the document is
/// malformed or the input holds no document at all.
pub fn json_parse(input: &str) -> Result<Value> {
    // One value, no end check: a scalar may run straight into trailing bytes.
    let mut de = Deserializer::from_str(input);
    Ok(Value::deserialize(&mut de)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_nested_document() {
        let value = json_parse(r#"{"a": [1, true, null, "x"], "b": {"c": 1.5}}"#).unwrap();
        assert_eq!(value, json!({"a": [1, true, null, "x"], "b": {"c": 1.5}}));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        assert_eq!(json_parse("[1, 2] garbage {").unwrap(), json!([1, 2]));
        assert_eq!(json_parse("{\"a\":1}\n{\"b\":2}\n").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn scalar_followed_by_bytes() {
        assert_eq!(json_parse("1x").unwrap(), json!(1));
        assert_eq!(json_parse("123abc").unwrap(), json!(123));
        assert_eq!(json_parse("truex").unwrap(), json!(true));
        assert_eq!(json_parse("null;").unwrap(), json!(null));
        assert_eq!(json_parse("\"s\"x").unwrap(), json!("s"));
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = json_parse("{\"a\": ").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn empty_input_is_parse_error() {
        assert!(json_parse("").unwrap_err().is_parse());
        assert!(json_parse("  \n").unwrap_err().is_parse());
    }
}
