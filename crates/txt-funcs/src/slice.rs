//! Positional sub-ranges of strings and lists with negative indices.
//!
//! `slice(v, a)` and `slice(v, a, b)` follow these rules, in order:
//!
//! 1. One or two indices, else [`SliceError::Arity`].
//! 2. Indices must be integers, else [`SliceError::Type`].
//! 3. `stop` defaults to the length `L`.
//! 4. If the raw `start == stop` the result is empty.
//! 5. An explicit pair of negative indices with `start > stop` is swapped, so
//!    `slice(v, -1, -2)` reads the same as `slice(v, -2, -1)`.
//! 6. A negative `start` counts from the end; so does a negative explicit `stop`.
//! 7. If `start > stop` now, an explicit `stop` is a [`SliceError::Range`] and
//!    a defaulted one gives the empty result.
//! 8. An explicit `stop` past `L` is clamped to `L`. `start` is never clamped:
//!    one that is still out of bounds is a [`SliceError::Index`].
//!
//! Strings are indexed by character.

use std::ops::Range;

use serde_json::Value;
use thiserror::Error;

use crate::registry::kind_of;

/// Errors from misuse of `slice`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    #[error("slice takes 1 or 2 indices, given {0}")]
    Arity(usize),

    #[error("slice: {0}")]
    Type(String),

    #[error("slice: invalid indices ({start}, {stop})")]
    Range { start: i64, stop: i64 },

    #[error("slice: indices ({start}, {stop}) out of range for length {len}")]
    Index { start: i64, stop: i64, len: usize },
}

/// Resolves `start`/`stop` against a value of length `len`.
pub fn bounds(len: usize, start: i64, stop: Option<i64>) -> Result<Range<usize>, SliceError> {
    let length = len as i64;
    let explicit = stop.is_some();
    let mut start = start;
    let mut stop = stop.unwrap_or(length);

    if start == stop {
        return Ok(0..0);
    }

    if explicit && start < 0 && stop < 0 && start > stop {
        std::mem::swap(&mut start, &mut stop);
    }

    if start < 0 {
        start += length;
    }
    if explicit && stop < 0 {
        stop += length;
    }

    if start > stop {
        return if explicit {
            Err(SliceError::Range { start, stop })
        } else {
            Ok(0..0)
        };
    }

    if explicit && stop > length {
        stop = length;
    }

    if start < 0 || start > stop {
        return Err(SliceError::Index { start, stop, len });
    }

    Ok(start as usize..stop as usize)
}

/// `slice(value, start[, stop])` over a string or list, returning the same kind.
pub fn slice(value: &Value, indices: &[Value]) -> Result<Value, SliceError> {
    if indices.is_empty() || indices.len() > 2 {
        return Err(SliceError::Arity(indices.len()));
    }

    let len = match value {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        other => {
            return Err(SliceError::Type(format!(
                "can't index item of type {}",
                kind_of(other)
            )))
        }
    };

    let start = index(&indices[0])?;
    let stop = indices.get(1).map(index).transpose()?;
    let range = bounds(len, start, stop)?;

    Ok(match value {
        Value::String(s) => Value::String(
            s.chars()
                .skip(range.start)
                .take(range.end - range.start)
                .collect(),
        ),
        Value::Array(items) => Value::Array(items[range].to_vec()),
        _ => unreachable!("length was only computed for strings and lists"),
    })
}

fn index(value: &Value) -> Result<i64, SliceError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| SliceError::Type(format!("cannot use {} as an index", n))),
        other => Err(SliceError::Type(format!(
            "cannot index with type {}",
            kind_of(other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn s(value: &str, indices: &[i64]) -> Result<Value, SliceError> {
        let indices: Vec<Value> = indices.iter().map(|i| json!(i)).collect();
        slice(&json!(value), &indices)
    }

    #[test]
    fn plain_ranges() {
        assert_eq!(s("hello", &[1, 3]).unwrap(), json!("el"));
        assert_eq!(s("hello", &[2]).unwrap(), json!("llo"));
        assert_eq!(s("hello", &[0, 5]).unwrap(), json!("hello"));
    }

    #[test]
    fn lists_keep_their_kind() {
        let list = json!(["a", "b", "c", "d"]);
        assert_eq!(slice(&list, &[json!(1), json!(3)]).unwrap(), json!(["b", "c"]));
        assert_eq!(slice(&list, &[json!(-1)]).unwrap(), json!(["d"]));
        assert_eq!(slice(&list, &[json!(0), json!(0)]).unwrap(), json!([]));
    }

    #[test]
    fn equal_raw_indices_are_empty_before_normalization() {
        assert_eq!(s("", &[0, 0]).unwrap(), json!(""));
        assert_eq!(s("abc", &[-1, -1]).unwrap(), json!(""));
        // start == defaulted stop
        assert_eq!(s("abc", &[3]).unwrap(), json!(""));
        // Would be out of range if normalized first.
        assert_eq!(s("abc", &[9, 9]).unwrap(), json!(""));
    }

    #[test]
    fn negative_start_counts_from_end() {
        assert_eq!(s("hello", &[-3]).unwrap(), json!("llo"));
        assert_eq!(s("hello", &[-3, 4]).unwrap(), json!("ll"));
    }

    #[test]
    fn negative_pair_ascending() {
        assert_eq!(s("hello", &[-3, -1]).unwrap(), json!("ll"));
    }

    #[test]
    fn descending_negative_pair_is_swapped() {
        assert_eq!(s("hello", &[-1, -2]).unwrap(), s("hello", &[-2, -1]).unwrap());
        assert_eq!(s("hello", &[-1, -3]).unwrap(), json!("ll"));
    }

    #[test]
    fn explicit_stop_before_start_is_range_error() {
        assert_eq!(
            s("hello", &[3, 1]).unwrap_err(),
            SliceError::Range { start: 3, stop: 1 }
        );
        // Mixed signs are not swapped.
        assert_eq!(
            s("hello", &[0, -10]).unwrap_err(),
            SliceError::Range { start: 0, stop: -5 }
        );
    }

    #[test]
    fn defaulted_stop_before_start_is_empty() {
        assert_eq!(s("abc", &[7]).unwrap(), json!(""));
    }

    #[test]
    fn explicit_stop_is_clamped() {
        assert_eq!(s("abc", &[1, 100]).unwrap(), json!("bc"));
    }

    #[test]
    fn start_is_never_clamped() {
        assert_eq!(
            s("abc", &[5, 10]).unwrap_err(),
            SliceError::Index { start: 5, stop: 3, len: 3 }
        );
        assert_eq!(
            s("abc", &[-10]).unwrap_err(),
            SliceError::Index { start: -7, stop: 3, len: 3 }
        );
        assert!(matches!(s("abc", &[-10, -5]), Err(SliceError::Index { .. })));
    }

    #[test]
    fn arity_and_type_errors() {
        assert_eq!(s("abc", &[]).unwrap_err(), SliceError::Arity(0));
        assert_eq!(s("abc", &[1, 2, 3]).unwrap_err(), SliceError::Arity(3));
        assert!(matches!(
            slice(&json!("abc"), &[json!("1")]),
            Err(SliceError::Type(_))
        ));
        assert!(matches!(
            slice(&json!("abc"), &[json!(1.5)]),
            Err(SliceError::Type(_))
        ));
        assert!(matches!(
            slice(&json!({"a": 1}), &[json!(0)]),
            Err(SliceError::Type(ref m)) if m.contains("map")
        ));
        assert!(matches!(slice(&json!(42), &[json!(0)]), Err(SliceError::Type(_))));
    }

    #[test]
    fn strings_slice_by_character() {
        assert_eq!(s("héllo", &[1, 3]).unwrap(), json!("él"));
        assert_eq!(s("日本語", &[-1]).unwrap(), json!("語"));
    }

    fn list_of(len: usize) -> Value {
        Value::Array((0..len).map(|i| json!(i)).collect())
    }

    proptest! {
        #[test]
        fn in_bounds_pair_is_subrange(len in 0usize..40, a in 0usize..40, b in 0usize..40) {
            let (a, b) = (a.min(b).min(len), a.max(b).min(len));
            let list = list_of(len);
            let out = slice(&list, &[json!(a), json!(b)]).unwrap();
            let out = out.as_array().unwrap();
            prop_assert_eq!(out.len(), b - a);
            prop_assert_eq!(&out[..], &list.as_array().unwrap()[a..b]);
        }

        #[test]
        fn negative_start_matches_offset(len in 1usize..40, k in 1usize..40) {
            let k = k.min(len);
            let list = list_of(len);
            prop_assert_eq!(
                slice(&list, &[json!(-(k as i64))]).unwrap(),
                slice(&list, &[json!(len - k)]).unwrap()
            );
        }

        #[test]
        fn descending_negative_pair_matches_ascending(text in "[a-z]{2,20}", i in 1i64..20, j in 1i64..20) {
            let len = text.chars().count() as i64;
            let (lo, hi) = (i.min(j).min(len), i.max(j).min(len));
            prop_assume!(lo != hi);
            let value = json!(text);
            prop_assert_eq!(
                slice(&value, &[json!(-lo), json!(-hi)]).unwrap(),
                slice(&value, &[json!(-hi), json!(-lo)]).unwrap()
            );
        }

        #[test]
        fn zero_zero_is_empty(text in ".{0,10}") {
            prop_assert_eq!(slice(&json!(text), &[json!(0), json!(0)]).unwrap(), json!(""));
        }
    }
}
