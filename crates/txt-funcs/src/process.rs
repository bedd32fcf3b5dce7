//! `exec` and `pipe`: run a command and return its stdout.

use std::sync::Arc;

use serde_json::Value;
use txt_exec::ProcessRunner;

use crate::error::FuncError;
use crate::registry::{str_arg, str_args, Arity, Registry};

/// Registers `exec(name, args...)` and `pipe(name, args..., input)`.
pub fn register(registry: &mut Registry, runner: &Arc<dyn ProcessRunner>) {
    let r = Arc::clone(runner);
    registry.register(
        "exec",
        Arity::at_least(1),
        move |args: &[Value]| -> Result<Value, FuncError> {
            let name = str_arg("exec", args, 0)?;
            let rest = str_args("exec", args, 1)?;
            Ok(r.run(name, &rest, None)?.into())
        },
    );

    let r = Arc::clone(runner);
    registry.register(
        "pipe",
        Arity::at_least(2),
        move |args: &[Value]| -> Result<Value, FuncError> {
            let name = str_arg("pipe", args, 0)?;
            let (input, middle) = match args.split_last() {
                Some((last, rest)) => (last, rest),
                None => return Err(FuncError::argument("pipe", "missing input")),
            };
            let input = match input {
                Value::String(s) => s.as_str(),
                _ => return Err(FuncError::argument("pipe", "input must be a string")),
            };
            let rest = str_args("pipe", middle, 1)?;
            Ok(r.run(name, &rest, Some(input))?.into())
        },
    );
}
