use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::process::{run, ProcessError};

/// Something that can run a command to completion and hand back its stdout.
pub trait ProcessRunner: Send + Sync {
    /// Run `name` with `args`, feeding `input` to stdin when given.
    fn run(&self, name: &str, args: &[String], input: Option<&str>) -> Result<String, ProcessError>;
}

/// Runs real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, name: &str, args: &[String], input: Option<&str>) -> Result<String, ProcessError> {
        run(name, args, input)
    }
}

/// A single call observed by [`MockRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub name: String,
    pub args: Vec<String>,
    pub input: Option<String>,
}

/// Canned-output runner for testing.
///
/// Commands without a canned response fail as if they could not be spawned.
#[derive(Debug, Default)]
pub struct MockRunner {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `name` with `stdout`.
    pub fn with_output(mut self, name: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.outputs.insert(name.into(), stdout.into());
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, name: &str, args: &[String], input: Option<&str>) -> Result<String, ProcessError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                name: name.to_string(),
                args: args.to_vec(),
                input: input.map(str::to_string),
            });

        self.outputs
            .get(name)
            .cloned()
            .ok_or_else(|| ProcessError::Spawn {
                command: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no canned output"),
            })
    }
}
