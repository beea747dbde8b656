pub mod cli;
pub mod config;
pub mod input;

use anyhow::Context;
use clap::Parser;

use cli::{Cli, render_report};
use common::logger::{TraceId, child_span, init_logger, root_span};
use config::{AppConfig, OutputFormat};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::from_env().with_cli(&cli);

    init_logger("leveling", cfg.log_format);

    let trace_id = TraceId::default();
    let _run = root_span("leveling_run", &trace_id).entered();

    let text = input::read_input(cfg.input.as_deref()).with_context(|| match &cfg.input {
        Some(path) => format!("reading {}", path.display()),
        None => "reading stdin".to_string(),
    })?;

    println!("{}", run(&text, cfg.output)?);
    Ok(())
}

/// Parse the raw input, scan it and render the result for stdout.
fn run(text: &str, output: OutputFormat) -> anyhow::Result<String> {
    let stream = {
        let _parse = child_span("parse_input").entered();
        input::parse_stream(text).context("parsing stream")?
    };
    tracing::info!(
        len = stream.values.len(),
        window_size = stream.window_size,
        "stream loaded"
    );

    let report = {
        let _scan = child_span("scan").entered();
        leveling::scan(stream.window_size, stream.values)?
    };

    render_report(&report, output)
}
