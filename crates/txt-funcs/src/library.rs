//! The standard function table.

use std::sync::Arc;

use serde_json::Value;
use txt_exec::{ProcessRunner, SystemRunner};
use txt_ingest::{RegexCache, SplitDefaults};

use crate::env::{EnvReader, RealEnv};
use crate::error::FuncError;
use crate::registry::{Arity, Registry};
use crate::slice::slice;
use crate::{env, input, pattern, process, strings};

/// Shared resources the standard functions close over.
#[derive(Clone)]
pub struct LibraryContext {
    pub cache: Arc<RegexCache>,
    pub defaults: Arc<SplitDefaults>,
    pub env: Arc<dyn EnvReader>,
    pub runner: Arc<dyn ProcessRunner>,
}

impl LibraryContext {
    /// A context over the real environment and real processes.
    pub fn new(cache: Arc<RegexCache>) -> Self {
        Self {
            cache,
            defaults: Arc::new(SplitDefaults::default()),
            env: Arc::new(RealEnv),
            runner: Arc::new(SystemRunner),
        }
    }

    pub fn with_defaults(mut self, defaults: SplitDefaults) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }

    pub fn with_env(mut self, env: Arc<dyn EnvReader>) -> Self {
        self.env = env;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }
}

impl std::fmt::Debug for LibraryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryContext")
            .field("cache", &self.cache)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Builds the full function table.
pub fn standard(ctx: &LibraryContext) -> Registry {
    let mut registry = Registry::new();

    input::register(&mut registry, &ctx.cache, &ctx.defaults);
    strings::register(&mut registry);
    pattern::register(&mut registry, &ctx.cache);
    env::register(&mut registry, &ctx.env);
    process::register(&mut registry, &ctx.runner);

    registry
        .register("slice", Arity::between(2, 3), slice_fn)
        .register("toJSON", Arity::exactly(1), to_json);

    tracing::debug!(functions = registry.len(), "built function library");
    registry
}

fn slice_fn(args: &[Value]) -> Result<Value, FuncError> {
    Ok(slice(&args[0], &args[1..])?)
}

fn to_json(args: &[Value]) -> Result<Value, FuncError> {
    Ok(serde_json::to_string(&args[0])?.into())
}
