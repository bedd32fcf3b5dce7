//! Error types for template functions.

use thiserror::Error;
use txt_exec::ProcessError;
use txt_ingest::IngestError;

use crate::registry::Arity;
use crate::slice::SliceError;

/// Errors a template function can return. Any of them ends the render.
#[derive(Debug, Error)]
pub enum FuncError {
    /// Wrong number of arguments for the function's schema.
    #[error("function `{name}` takes {expected} arguments, given {given}")]
    Arity {
        name: String,
        expected: Arity,
        given: usize,
    },

    /// An argument had the wrong type or an unusable value.
    #[error("function `{name}`: {message}")]
    Argument { name: String, message: String },

    /// No function is registered under this name.
    #[error("unknown function `{0}`")]
    Unknown(String),

    #[error(transparent)]
    Slice(#[from] SliceError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl FuncError {
    /// Create an argument error for function `name`.
    pub fn argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Argument {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_error_display() {
        let err = FuncError::Arity {
            name: "split".into(),
            expected: Arity::exactly(2),
            given: 3,
        };
        assert_eq!(err.to_string(), "function `split` takes 2 arguments, given 3");
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: FuncError = IngestError::EmptyRecordSeparator.into();
        assert_eq!(err.to_string(), "empty record separator");
    }
}
