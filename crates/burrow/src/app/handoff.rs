//! Running the editor in the foreground.
//!
//! `Idle -> Suspending -> ChildRunning -> Restoring -> Idle`. The phase
//! only leaves `Idle` through `EditorHandoff::open`, and any request made
//! while it is elsewhere is answered with `EditorOutcome::Busy`, so a
//! stuck key cannot stack editors.

use std::cell::Cell;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::config::EditorConfig;
use crate::terminal::{Handoff, TerminalError, TerminalGuard, TerminalHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffPhase {
    Idle,
    Suspending,
    ChildRunning,
    Restoring,
}

#[derive(Debug)]
pub enum EditorOutcome {
    /// The editor ran; a non-zero status is not an error.
    Exited(ExitStatus),
    SpawnFailed(io::Error),
    Busy,
}

pub struct EditorHandoff<H: TerminalHost> {
    guard: TerminalGuard<H>,
    phase: Cell<HandoffPhase>,
}

impl<H: TerminalHost> EditorHandoff<H> {
    pub fn new(guard: TerminalGuard<H>) -> Self {
        Self {
            guard,
            phase: Cell::new(HandoffPhase::Idle),
        }
    }

    pub fn guard(&self) -> &TerminalGuard<H> {
        &self.guard
    }

    #[cfg(test)]
    pub fn phase(&self) -> HandoffPhase {
        self.phase.get()
    }

    /// Suspend the UI, run `launch(path)` to completion, restore the UI.
    ///
    /// Only an error from restoring the terminal is returned as `Err`.
    pub fn open<F>(&self, path: &Path, launch: F) -> Result<EditorOutcome, TerminalError>
    where
        F: FnOnce(&Path) -> io::Result<ExitStatus>,
    {
        if self.phase.get() != HandoffPhase::Idle {
            tracing::warn!(phase = ?self.phase.get(), "editor already open, ignoring");
            return Ok(EditorOutcome::Busy);
        }
        let _reset = PhaseReset(&self.phase);
        self.set_phase(HandoffPhase::Suspending);

        let handoff = self.guard.with_suspended_ui(|| {
            self.set_phase(HandoffPhase::ChildRunning);
            let status = launch(path);
            self.set_phase(HandoffPhase::Restoring);
            status
        })?;

        Ok(match handoff {
            Handoff::Completed(Ok(status)) => {
                tracing::info!(path = %path.display(), %status, "editor exited");
                EditorOutcome::Exited(status)
            }
            Handoff::Completed(Err(err)) => {
                tracing::warn!(path = %path.display(), error = %err, "editor failed to start");
                EditorOutcome::SpawnFailed(err)
            }
            Handoff::Busy => EditorOutcome::Busy,
        })
    }

    fn set_phase(&self, phase: HandoffPhase) {
        tracing::debug!(from = ?self.phase.get(), to = ?phase, "handoff phase");
        self.phase.set(phase);
    }
}

/// Returns the phase to `Idle` on every exit path.
struct PhaseReset<'a>(&'a Cell<HandoffPhase>);

impl Drop for PhaseReset<'_> {
    fn drop(&mut self) {
        self.0.set(HandoffPhase::Idle);
    }
}

/// Run the configured editor on `path` with the real terminal streams.
///
/// A command with spaces (`code -w`) is split into program and leading
/// arguments; configured args follow, then the path.
pub fn run_editor(editor: &EditorConfig, path: &Path) -> io::Result<ExitStatus> {
    let mut words = editor.command.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "editor command is empty"))?;
    Command::new(program)
        .args(words)
        .args(&editor.args)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
}
