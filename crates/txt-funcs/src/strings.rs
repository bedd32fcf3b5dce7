//! String transforms.
//!
//! Where a function takes a modifier and a string, the string comes last so
//! calls read naturally in a pipeline-free template: `trimPrefix("v", tag)`.

use serde_json::Value;

use crate::error::FuncError;
use crate::quote::{quote_ascii, quote_csv, quote_string};
use crate::registry::{kind_of, str_arg, Arity, Registry};

/// Registers the string functions on `registry`.
pub fn register(registry: &mut Registry) {
    registry
        .register("lower", Arity::exactly(1), lower)
        .register("upper", Arity::exactly(1), upper)
        .register("title", Arity::exactly(1), title)
        .register("trim", Arity::exactly(1), trim)
        .register("trimCutset", Arity::exactly(2), trim_cutset)
        .register("trimLeft", Arity::exactly(2), trim_left)
        .register("trimRight", Arity::exactly(2), trim_right)
        .register("trimPrefix", Arity::exactly(2), trim_prefix)
        .register("trimSuffix", Arity::exactly(2), trim_suffix)
        .register("fields", Arity::exactly(1), fields)
        .register("join", Arity::exactly(2), join)
        .register("equalFold", Arity::exactly(2), equal_fold)
        .register("quoteCSV", Arity::exactly(1), quote)
        .register("quoteGo", Arity::exactly(1), quote_go)
        .register("quoteGoASCII", Arity::exactly(1), quote_go_ascii)
        .register("nl", Arity::exactly(1), nl);
}

fn lower(args: &[Value]) -> Result<Value, FuncError> {
    Ok(str_arg("lower", args, 0)?.to_lowercase().into())
}

fn upper(args: &[Value]) -> Result<Value, FuncError> {
    Ok(str_arg("upper", args, 0)?.to_uppercase().into())
}

// Every letter, not just word starts.
fn title(args: &[Value]) -> Result<Value, FuncError> {
    Ok(str_arg("title", args, 0)?.chars().map(title_case).collect::<String>().into())
}

/// Single-character title case.
///
/// Differs from uppercase for the Latin digraphs and the Greek letters with
/// ypogegrammeni. A letter whose uppercase is several characters is kept.
fn title_case(c: char) -> char {
    let shifted = |base: u32| char::from_u32(base).unwrap_or(c);
    match c {
        '\u{1C4}'..='\u{1C6}' => '\u{1C5}',
        '\u{1C7}'..='\u{1C9}' => '\u{1C8}',
        '\u{1CA}'..='\u{1CC}' => '\u{1CB}',
        '\u{1F1}'..='\u{1F3}' => '\u{1F2}',
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            shifted(c as u32 + 8)
        }
        '\u{1FB3}' => '\u{1FBC}',
        '\u{1FC3}' => '\u{1FCC}',
        '\u{1FF3}' => '\u{1FFC}',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        }
    }
}

fn trim(args: &[Value]) -> Result<Value, FuncError> {
    Ok(str_arg("trim", args, 0)?.trim().into())
}

fn trim_cutset(args: &[Value]) -> Result<Value, FuncError> {
    let cutset = str_arg("trimCutset", args, 0)?;
    let s = str_arg("trimCutset", args, 1)?;
    Ok(s.trim_matches(|c: char| cutset.contains(c)).into())
}

fn trim_left(args: &[Value]) -> Result<Value, FuncError> {
    let cutset = str_arg("trimLeft", args, 0)?;
    let s = str_arg("trimLeft", args, 1)?;
    Ok(s.trim_start_matches(|c: char| cutset.contains(c)).into())
}

fn trim_right(args: &[Value]) -> Result<Value, FuncError> {
    let cutset = str_arg("trimRight", args, 0)?;
    let s = str_arg("trimRight", args, 1)?;
    Ok(s.trim_end_matches(|c: char| cutset.contains(c)).into())
}

fn trim_prefix(args: &[Value]) -> Result<Value, FuncError> {
    let prefix = str_arg("trimPrefix", args, 0)?;
    let s = str_arg("trimPrefix", args, 1)?;
    Ok(s.strip_prefix(prefix).unwrap_or(s).into())
}

fn trim_suffix(args: &[Value]) -> Result<Value, FuncError> {
    let suffix = str_arg("trimSuffix", args, 0)?;
    let s = str_arg("trimSuffix", args, 1)?;
    Ok(s.strip_suffix(suffix).unwrap_or(s).into())
}

fn fields(args: &[Value]) -> Result<Value, FuncError> {
    let s = str_arg("fields", args, 0)?;
    Ok(Value::Array(
        s.split_whitespace().map(|f| Value::String(f.to_string())).collect(),
    ))
}

fn join(args: &[Value]) -> Result<Value, FuncError> {
    let sep = str_arg("join", args, 0)?;
    let items = match &args[1] {
        Value::Array(items) => items,
        other => {
            return Err(FuncError::argument(
                "join",
                format!("argument 2 must be a list, got {}", kind_of(other)),
            ))
        }
    };
    let parts = items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(FuncError::argument(
                "join",
                format!("cannot join an item of type {}", kind_of(other)),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(sep).into())
}

fn equal_fold(args: &[Value]) -> Result<Value, FuncError> {
    let a = str_arg("equalFold", args, 0)?;
    let b = str_arg("equalFold", args, 1)?;
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    Ok(Value::Bool(fold(a) == fold(b)))
}

fn quote(args: &[Value]) -> Result<Value, FuncError> {
    Ok(quote_csv(str_arg("quoteCSV", args, 0)?).into())
}

fn quote_go(args: &[Value]) -> Result<Value, FuncError> {
    Ok(quote_string(str_arg("quoteGo", args, 0)?).into())
}

fn quote_go_ascii(args: &[Value]) -> Result<Value, FuncError> {
    Ok(quote_ascii(str_arg("quoteGoASCII", args, 0)?).into())
}

fn nl(args: &[Value]) -> Result<Value, FuncError> {
    let s = str_arg("nl", args, 0)?;
    if s.is_empty() || s.ends_with('\n') {
        Ok(s.into())
    } else {
        Ok(format!("{}\n", s).into())
    }
}
