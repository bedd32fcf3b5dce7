//! The function table handed to the template engine.
//!
//! Each entry has a name, an argument-count schema and a uniform
//! `(&[Value]) -> Result<Value, FuncError>` body. The engine adapter checks
//! nothing itself: [`Entry::call`] enforces the schema before the body runs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::FuncError;

/// Describes a type which can be called from a template.
pub trait Function: Send + Sync {
    /// Execute the function with the given arguments and return a new Value.
    fn call(&self, args: &[Value]) -> Result<Value, FuncError>;
}

/// Allows any closure or fn matching the signature of `call` to be used as a
/// [`Function`] without declaring a type.
impl<F> Function for F
where
    F: Fn(&[Value]) -> Result<Value, FuncError> + Send + Sync,
{
    fn call(&self, args: &[Value]) -> Result<Value, FuncError> {
        self(args)
    }
}

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` for variadic functions.
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) if max == self.min + 1 => write!(f, "{} or {}", self.min, max),
            Some(max) => write!(f, "{} to {}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// A registered function.
pub struct Entry {
    name: String,
    arity: Arity,
    function: Box<dyn Function>,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Checks the argument count against the schema, then runs the body.
    pub fn call(&self, args: &[Value]) -> Result<Value, FuncError> {
        if !self.arity.accepts(args.len()) {
            return Err(FuncError::Arity {
                name: self.name.clone(),
                expected: self.arity,
                given: args.len(),
            });
        }
        self.function.call(args)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name → function table.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, Arc<Entry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function, replacing any existing entry with the same name.
    pub fn register<F>(&mut self, name: &str, arity: Arity, function: F) -> &mut Self
    where
        F: Function + 'static,
    {
        self.entries.insert(
            name.to_string(),
            Arc::new(Entry {
                name: name.to_string(),
                arity,
                function: Box::new(function),
            }),
        );
        self
    }

    /// Add a function.
    ///
    /// Returns the [`Registry`], so additional functions may be chained.
    pub fn with<F>(mut self, name: &str, arity: Arity, function: F) -> Self
    where
        F: Function + 'static,
    {
        self.register(name, arity, function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Entry>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Call the function registered under `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, FuncError> {
        self.get(name)
            .ok_or_else(|| FuncError::Unknown(name.to_string()))?
            .call(args)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Arc<Entry>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The string argument at `index`.
pub(crate) fn str_arg<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a str, FuncError> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(FuncError::argument(
            name,
            format!(
                "argument {} must be a string, got {}",
                index + 1,
                kind_of(other)
            ),
        )),
        None => Err(FuncError::argument(
            name,
            format!("missing argument {}", index + 1),
        )),
    }
}

/// Every argument from `from` on, as strings.
pub(crate) fn str_args(name: &str, args: &[Value], from: usize) -> Result<Vec<String>, FuncError> {
    (from..args.len())
        .map(|i| str_arg(name, args, i).map(str::to_string))
        .collect()
}

/// Type name used in error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo(args: &[Value]) -> Result<Value, FuncError> {
        Ok(Value::Array(args.to_vec()))
    }

    #[test]
    fn test_register_and_call() {
        let registry = Registry::new().with("echo", Arity::between(1, 2), echo);
        assert!(registry.contains("echo"));
        assert_eq!(registry.call("echo", &[json!(1)]).unwrap(), json!([1]));
    }

    #[test]
    fn test_arity_checked_before_call() {
        let registry = Registry::new().with("echo", Arity::between(1, 2), echo);
        let err = registry.call("echo", &[]).unwrap_err();
        assert!(matches!(err, FuncError::Arity { given: 0, .. }));
        assert_eq!(err.to_string(), "function `echo` takes 1 or 2 arguments, given 0");
        assert!(registry
            .call("echo", &[json!(1), json!(2), json!(3)])
            .is_err());
    }

    #[test]
    fn test_unknown_function() {
        let err = Registry::new().call("ghost", &[]).unwrap_err();
        assert!(matches!(err, FuncError::Unknown(ref n) if n == "ghost"));
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = Registry::new();
        registry.register("f", Arity::exactly(0), |_: &[Value]| -> Result<Value, FuncError> {
            Ok(json!("a"))
        });
        registry.register("f", Arity::exactly(0), |_: &[Value]| -> Result<Value, FuncError> {
            Ok(json!("b"))
        });
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.call("f", &[]).unwrap(), json!("b"));
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::exactly(1).to_string(), "1");
        assert_eq!(Arity::between(3, 4).to_string(), "3 or 4");
        assert_eq!(Arity::between(1, 4).to_string(), "1 to 4");
        assert_eq!(Arity::at_least(2).to_string(), "at least 2");
        assert!(Arity::at_least(2).accepts(10));
        assert!(!Arity::at_least(2).accepts(1));
    }

    #[test]
    fn test_str_arg_type_error() {
        let err = str_arg("upper", &[json!(3)], 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "function `upper`: argument 1 must be a string, got number"
        );
    }
}
