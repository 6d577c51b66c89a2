//! Terminal ownership and the embedded shell.
//!
//! - `guard`: suspending and restoring the UI around a foreground child
//! - `pty`: the shell session and its output pump
//! - `output`: the shared, bounded output log
//! - `render`: turning that log into styled lines
//! - `input`: encoding keys for the PTY

pub mod guard;
mod input;
pub mod output;
mod pty;
mod render;

pub use guard::{CrosstermHost, Handoff, TerminalError, TerminalGuard, TerminalHost};
pub use input::key_to_bytes;
pub use output::{OutputLog, DEFAULT_SCROLLBACK_BYTES};
pub use pty::{ShellCommand, ShellSession};
pub use render::render_log_lines;
