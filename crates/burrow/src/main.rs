mod app;
mod browser;
mod cli;
mod commands;
mod config;
mod events;
mod git;
mod keymap;
mod logging;
mod terminal;
mod test_utils;

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let log_path = cli.log_file.unwrap_or_else(logging::default_log_path);
    // Running without a log file is fine; the UI does not depend on it.
    let _ = logging::init(&log_path);

    let requested = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let start_dir = std::fs::canonicalize(&requested)
        .with_context(|| format!("cannot open {}", requested.display()))?;
    tracing::info!(start = %start_dir.display(), "burrow starting");

    let result = app::run(&start_dir);
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "burrow exited with error");
    }
    result
}
