//! Tracing subscriber setup.
//!
//! Logs go to a per-process file; stdout and stderr belong to the UI.
//! Filtering comes from `BURROW_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `info`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILTER_ENV: &str = "BURROW_LOG";

/// `$XDG_STATE_HOME/burrow/logs`, falling back to
/// `~/.local/state/burrow/logs` and then the temp dir.
pub fn log_dir() -> PathBuf {
    let state_home = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")));
    match state_home {
        Some(base) => base.join("burrow").join("logs"),
        None => std::env::temp_dir().join("burrow").join("logs"),
    }
}

pub fn default_log_path() -> PathBuf {
    log_dir().join(format!("burrow-{}.log", std::process::id()))
}

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    build_subscriber(file).init();
    Ok(())
}

fn build_subscriber(file: File) -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Arc::new(file));
    tracing_subscriber::registry().with(fmt_layer).with(filter)
}
