//! Parsing functions, over template strings (`parse*`) or named files (`read*`).
//!
//! The text or file name is always the last argument. An optional header
//! spec sits just before it, so `parse(RS, FS, input)` and
//! `parse(RS, FS, header, input)` are both accepted. Empty RS, FS and LP
//! arguments take the run's [`SplitDefaults`].

use std::sync::Arc;

use serde_json::Value;
use txt_ingest::{
    csv_parse, json_parse, line_split, pattern_split, read_file, HeaderSpec, RegexCache,
    SplitDefaults,
};

use crate::error::FuncError;
use crate::registry::{str_arg, Arity, Registry};

/// Everything the parsing functions share.
#[derive(Debug, Clone)]
struct Parser {
    cache: Arc<RegexCache>,
    defaults: Arc<SplitDefaults>,
}

/// Parses `text` given the leading (non-input) arguments.
type ParseFn = fn(&Parser, &str, &[Value], &str) -> Result<Value, FuncError>;

impl Parser {
    fn split(&self, name: &str, lead: &[Value], text: &str) -> Result<Value, FuncError> {
        let rs = self.defaults.record_separator(str_arg(name, lead, 0)?);
        let fs = self.defaults.field_separator(str_arg(name, lead, 1)?);
        let header = optional_header(name, lead, 2)?;
        let shaped = pattern_split(&self.cache, rs, fs, header.as_ref(), text)?;
        Ok(serde_json::to_value(shaped)?)
    }

    fn lines(&self, name: &str, lead: &[Value], text: &str) -> Result<Value, FuncError> {
        let rs = self.defaults.record_separator(str_arg(name, lead, 0)?);
        let lp = self.defaults.line_pattern(str_arg(name, lead, 1)?);
        let header = optional_header(name, lead, 2)?.unwrap_or(HeaderSpec::FromInput);
        let shaped = line_split(&self.cache, rs, lp, Some(&header), text)?;
        Ok(serde_json::to_value(shaped)?)
    }

    fn csv(&self, name: &str, lead: &[Value], text: &str) -> Result<Value, FuncError> {
        let header = optional_header(name, lead, 0)?.unwrap_or(HeaderSpec::FromInput);
        Ok(serde_json::to_value(csv_parse(&header, text)?)?)
    }

    fn json(&self, _name: &str, _lead: &[Value], text: &str) -> Result<Value, FuncError> {
        Ok(json_parse(text)?)
    }
}

fn optional_header(name: &str, lead: &[Value], index: usize) -> Result<Option<HeaderSpec>, FuncError> {
    if index < lead.len() {
        Ok(Some(HeaderSpec::parse(str_arg(name, lead, index)?)))
    } else {
        Ok(None)
    }
}

/// Registers the `parse*`, `read*` and `readFile` functions.
pub fn register(registry: &mut Registry, cache: &Arc<RegexCache>, defaults: &Arc<SplitDefaults>) {
    let parser = Parser {
        cache: Arc::clone(cache),
        defaults: Arc::clone(defaults),
    };

    register_pair(registry, &parser, ("parse", "read"), Arity::between(3, 4), Parser::split);
    register_pair(registry, &parser, ("parseLine", "readLine"), Arity::between(3, 4), Parser::lines);
    register_pair(registry, &parser, ("parseCSV", "readCSV"), Arity::between(1, 2), Parser::csv);
    register_pair(registry, &parser, ("parseJSON", "readJSON"), Arity::exactly(1), Parser::json);

    registry.register("readFile", Arity::exactly(1), read_whole_file);
}

/// Registers one parser twice: over text, and over the contents of a file.
fn register_pair(
    registry: &mut Registry,
    parser: &Parser,
    (text_name, file_name): (&'static str, &'static str),
    arity: Arity,
    parse: ParseFn,
) {
    let p = parser.clone();
    registry.register(
        text_name,
        arity,
        move |args: &[Value]| -> Result<Value, FuncError> {
            let (lead, last) = split_input(args);
            let text = str_arg(text_name, args, last)?;
            parse(&p, text_name, lead, text)
        },
    );

    let p = parser.clone();
    registry.register(
        file_name,
        arity,
        move |args: &[Value]| -> Result<Value, FuncError> {
            let (lead, last) = split_input(args);
            let path = str_arg(file_name, args, last)?;
            tracing::debug!(function = file_name, path, "reading file");
            let text = read_file(path)?;
            parse(&p, file_name, lead, &text)
        },
    );
}

/// Leading arguments and the index of the input argument.
fn split_input(args: &[Value]) -> (&[Value], usize) {
    let last = args.len().saturating_sub(1);
    (&args[..last], last)
}

fn read_whole_file(args: &[Value]) -> Result<Value, FuncError> {
    let path = str_arg("readFile", args, 0)?;
    Ok(read_file(path)?.into())
}
