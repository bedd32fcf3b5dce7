//! One run: load templates, read and shape stdin, render.

use std::sync::Arc;

use anyhow::{Context, Result};
use txt_funcs::{standard, LibraryContext};
use txt_ingest::{ingest, read_stdin, Dot, RegexCache, StdinReader};
use txt_render::{MiniJinjaEngine, TemplateEngine};

use crate::cli::Cli;

/// Renders the main template and returns the complete output.
///
/// Nothing is written here, so a failure anywhere leaves stdout untouched.
pub fn run(cli: &Cli, stdin: &dyn StdinReader) -> Result<String> {
    let templates = cli.template_set().context("loading templates")?;

    let defaults = cli.split_defaults();
    let cache = Arc::new(RegexCache::new());

    let dot = match cli.format(&defaults) {
        None => Dot::Empty,
        Some(format) => {
            let input = read_stdin(stdin)?;
            ingest(&cache, &format, &input)
                .with_context(|| format!("reading {} input", format.name()))?
        }
    };

    let registry = standard(&LibraryContext::new(Arc::clone(&cache)).with_defaults(defaults));
    let mut engine = if cli.html {
        MiniJinjaEngine::html()
    } else {
        MiniJinjaEngine::new()
    };
    engine.install(&registry);

    let main = templates.main()?.to_string();
    let output = templates
        .render(&mut engine, &dot.into_json())
        .with_context(|| format!("rendering template `{}`", main))?;

    let stats = cache.stats();
    tracing::info!(
        bytes = output.len(),
        regex_hits = stats.hits,
        regex_misses = stats.misses,
        "rendered"
    );
    Ok(output)
}
