//! Application event types.
//!
//! Defines the event enum used for communication between the input
//! thread, the shell reader thread, the git log worker and the main loop.
//!
//! Events are sent via mpsc channels and processed sequentially
//! in the main loop, which is the only place app state changes.

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use crate::git::LogEntry;

#[derive(Debug)]
pub enum AppEvent {
    Input(KeyEvent),
    /// The terminal changed size; the next draw picks it up.
    Resize,
    /// New bytes are in the shell log.
    ShellOutput,
    /// Shell session `id` reached end of output.
    ShellExit(u64),
    GitLogUpdated {
        path: PathBuf,
        entries: Vec<LogEntry>,
    },
}
