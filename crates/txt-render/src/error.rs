//! Error types for template loading and rendering.
//!
//! [`RenderError`] hides the engine's own error type. Engine errors are
//! classified by kind, and failures raised by a template function keep their
//! own class so callers can tell a bad template from bad data.

use std::path::PathBuf;

use thiserror::Error;
use txt_funcs::FuncError;

/// Error type for template operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax error or compilation failure.
    #[error("template error: {0}")]
    TemplateError(String),

    /// Template not found in the set or the engine.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// A template function returned an error.
    #[error("{0}")]
    FunctionError(String),

    /// Data could not be converted for the engine.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// A template file could not be read.
    #[error("failed to read template {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither a template file nor an inline template was given.
    #[error("no template given")]
    NoTemplate,

    /// Other operational error.
    #[error("{0}")]
    OperationError(String),
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;
        use std::error::Error as _;

        if err.source().is_some_and(|source| source.is::<FuncError>()) {
            return RenderError::FunctionError(err.to_string());
        }

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::TemplateError(err.to_string()),
            ErrorKind::BadSerialization => RenderError::SerializationError(err.to_string()),
            _ => RenderError::OperationError(err.to_string()),
        }
    }
}
