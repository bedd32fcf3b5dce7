mod app;
mod cli;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use txt_ingest::RealStdin;

use crate::cli::Cli;

const CRATES: [&str; 5] = ["txt", "txt_ingest", "txt_exec", "txt_funcs", "txt_render"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = app::run(&cli, &RealStdin)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("writing output")?;
    Ok(())
}

/// Logs go to stderr, and only with `-v`. `RUST_LOG` overrides the level.
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let crate_filter = |level: &str| {
        CRATES
            .iter()
            .map(|name| format!("{}={}", name, level))
            .collect::<Vec<_>>()
            .join(",")
    };

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => format!("warn,{}", crate_filter("info")),
            2 => format!("info,{}", crate_filter("debug")),
            _ => format!("debug,{}", crate_filter("trace")),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}
