use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Command `{command}` could not be started: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Command `{command}` failed with status {status}")]
    Failed { command: String, status: ExitStatus },
    #[error("Command `{0}` output was not valid UTF-8")]
    InvalidUtf8(String),
}

/// Run `name` with `args` directly (no shell) and wait for it to exit.
///
/// Returns the command's stdout on success. When `input` is given it is
/// written to the child's stdin from a separate thread so a child that
/// produces output before consuming all of its input cannot deadlock;
/// otherwise stdin is empty. Stderr is shared with the current process.
///
/// # Notes
///
/// The entire stdout is buffered in memory before being returned.
pub fn run(name: &str, args: &[String], input: Option<&str>) -> Result<String, ProcessError> {
    let command = display_command(name, args);

    let mut cmd = Command::new(name);
    cmd.args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
        command: command.clone(),
        source,
    })?;
    tracing::debug!(command = %command, piped = input.is_some(), "spawned process");

    let writer = match (input, child.stdin.take()) {
        (Some(input), Some(mut stdin)) => {
            let input = input.to_owned();
            Some(thread::spawn(move || stdin.write_all(input.as_bytes())))
        }
        _ => None,
    };

    let mut output = Vec::new();
    if let Some(mut stdout) = child.stdout.take() {
        if let Err(e) = stdout.read_to_end(&mut output) {
            drop(stdout);
            reap(&mut child, writer);
            return Err(ProcessError::Io(e));
        }
    }
    let status = child.wait()?;

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Ok(())) => {}
            // The child may exit without reading all of its input.
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(ProcessError::Io(e)),
            Err(_) => {
                return Err(ProcessError::Io(std::io::Error::other(
                    "stdin writer thread panicked",
                )))
            }
        }
    }

    tracing::debug!(command = %command, %status, bytes = output.len(), "process exited");
    if !status.success() {
        return Err(ProcessError::Failed { command, status });
    }

    String::from_utf8(output).map_err(|_| ProcessError::InvalidUtf8(command))
}

type Writer = JoinHandle<std::io::Result<()>>;

/// Stops the child and collects it along with the stdin writer, ignoring
/// their results.
fn reap(child: &mut Child, writer: Option<Writer>) {
    let _ = child.kill();
    let _ = child.wait();
    if let Some(writer) = writer {
        let _ = writer.join();
    }
}

fn display_command(name: &str, args: &[String]) -> String {
    std::iter::once(name)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
