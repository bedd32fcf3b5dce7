//! Template engine abstraction.
//!
//! [`TemplateEngine`] is the seam between `txt` and whatever renders its
//! templates. [`MiniJinjaEngine`] is the implementation: every function in a
//! [`Registry`] becomes a global template function, and the root value is
//! bound as `dot`.

use std::sync::Arc;

use minijinja::value::Rest;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, Value};
use txt_funcs::{Entry, FuncError, Registry};

use crate::error::RenderError;

/// Name the root value is bound to in every template.
pub const DOT: &str = "dot";

/// A template engine that can render templates with data.
pub trait TemplateEngine: Send + Sync {
    /// Adds a named template to the engine.
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Renders a previously registered template against `dot`.
    fn render_named(&self, name: &str, dot: &serde_json::Value) -> Result<String, RenderError>;

    /// Compiles and renders a template string in one step.
    fn render_template(&self, template: &str, dot: &serde_json::Value) -> Result<String, RenderError>;

    /// Checks if a template with the given name exists.
    fn has_template(&self, name: &str) -> bool;

    /// Makes every function in `registry` callable from templates.
    fn install(&mut self, registry: &Registry);
}

/// MiniJinja-based template engine.
///
/// Trailing newlines in templates are kept. Output is not escaped unless the
/// engine was built with [`MiniJinjaEngine::html`].
///
/// ```rust
/// use serde_json::json;
/// use txt_render::{MiniJinjaEngine, TemplateEngine};
///
/// let engine = MiniJinjaEngine::new();
/// let out = engine
///     .render_template("{% for row in dot %}{{ row[1] }} {% endfor %}", &json!([["a", "1"], ["b", "2"]]))
///     .unwrap();
/// assert_eq!(out, "1 2 ");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// An engine that writes values as they are.
    pub fn new() -> Self {
        Self::with_escape(AutoEscape::None)
    }

    /// An engine that HTML-escapes every interpolated value.
    pub fn html() -> Self {
        Self::with_escape(AutoEscape::Html)
    }

    fn with_escape(escape: AutoEscape) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(move |_| escape.clone());
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn render_named(&self, name: &str, dot: &serde_json::Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(root_context(dot))?)
    }

    fn render_template(&self, template: &str, dot: &serde_json::Value) -> Result<String, RenderError> {
        Ok(self.env.render_str(template, root_context(dot))?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    fn install(&mut self, registry: &Registry) {
        for entry in registry.entries() {
            let entry = Arc::clone(entry);
            self.env.add_function(
                entry.name().to_string(),
                move |args: Rest<Value>| -> Result<Value, Error> { call_entry(&entry, &args.0) },
            );
        }
        tracing::debug!(functions = registry.len(), "installed template functions");
    }
}

/// The context every template sees: the keys of an object root at the top
/// level, and the whole root under [`DOT`].
fn root_context(dot: &serde_json::Value) -> Value {
    let mut context = serde_json::Map::new();
    if let serde_json::Value::Object(fields) = dot {
        context.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    context.insert(DOT.to_string(), dot.clone());
    Value::from_serialize(&context)
}

fn call_entry(entry: &Entry, args: &[Value]) -> Result<Value, Error> {
    let args = args
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| Error::new(ErrorKind::BadSerialization, e.to_string()))?;

    match entry.call(&args) {
        Ok(value) => Ok(Value::from_serialize(&value)),
        Err(err) => {
            tracing::debug!(function = entry.name(), error = %err, "template function failed");
            Err(Error::new(ErrorKind::InvalidOperation, describe(entry.name(), &err)).with_source(err))
        }
    }
}

/// Error text that always names the function.
fn describe(name: &str, err: &FuncError) -> String {
    match err {
        FuncError::Arity { .. } | FuncError::Argument { .. } | FuncError::Unknown(_) => {
            err.to_string()
        }
        other => format!("{}: {}", name, other),
    }
}
