//! Command system for the `:command` interface.
//!
//! - Registry: command specs and metadata (registry.rs)
//! - Parsing: tokenizing and validating command input (parse.rs)
//! - Execution: running commands and returning results (exec.rs)
//!
//! Commands are a verb followed by whitespace-separated arguments. The
//! leading `:` is optional. The registry provides completion and help.

mod exec;
mod parse;
mod registry;

pub use exec::{run_command, AppAction};
pub use parse::{complete_command_input, parse_command};
pub use registry::command_hint_lines;
