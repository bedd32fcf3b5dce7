//! Environment lookup for the `env` function.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::FuncError;
use crate::registry::{str_arg, Arity, Registry};

/// Abstraction over environment variables.
pub trait EnvReader: Send + Sync {
    /// Get an environment variable value.
    fn var(&self, name: &str) -> Option<String>;
}

/// Real environment variable reader. Non-UTF-8 values are converted lossily.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

/// Mock environment variable reader for testing.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    /// Create an empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Registers `env(key)`. A missing variable reads as `""`.
pub fn register(registry: &mut Registry, env: &Arc<dyn EnvReader>) {
    let env = Arc::clone(env);
    registry.register(
        "env",
        Arity::exactly(1),
        move |args: &[Value]| -> Result<Value, FuncError> {
            let key = str_arg("env", args, 0)?;
            Ok(env.var(key).unwrap_or_default().into())
        },
    );
}
