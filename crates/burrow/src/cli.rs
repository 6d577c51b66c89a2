use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "burrow",
    version,
    about = "Terminal file browser with an embedded shell"
)]
pub struct Cli {
    /// Directory to start in (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Write logs here instead of the per-process state file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
