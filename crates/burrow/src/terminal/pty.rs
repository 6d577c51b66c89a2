//! PTY spawning and shell session lifecycle.
//!
//! Handles the low-level portable-pty integration:
//! - Spawning the shell in a pseudo-terminal
//! - Pumping output into the shared `OutputLog` from a background thread
//! - Writing keystrokes to the PTY
//! - Resizing and teardown
//!
//! The session owns the PTY master exclusively. The reader thread holds a
//! cloned reader and stops on EOF or the first read error; it never
//! touches app state beyond the log and a redraw event.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use thiserror::Error;

use crate::events::AppEvent;

use super::output::OutputLog;

const READ_CHUNK: usize = 4096;

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("cannot allocate pseudo-terminal: {0}")]
    OpenPty(String),
    #[error("cannot start {shell}: {message}")]
    Exec { shell: String, message: String },
    #[error("cannot attach to pseudo-terminal: {0}")]
    Attach(String),
    #[error("cannot start output reader: {0}")]
    Reader(#[from] std::io::Error),
}

/// Shell program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// A running shell attached to a PTY.
pub struct ShellSession {
    id: u64,
    log: OutputLog,
    alive: Arc<AtomicBool>,
    writer: Box<dyn Write + Send>,
    master: Box<dyn MasterPty + Send>,
    child: Box<dyn Child + Send + Sync>,
    rows: u16,
    cols: u16,
}

impl ShellSession {
    /// Spawn `shell` under a new PTY and start pumping its output.
    ///
    /// Each chunk read is appended to `log` and followed by
    /// `AppEvent::ShellOutput`; the end of output sends
    /// `AppEvent::ShellExit(id)`.
    pub fn spawn(
        id: u64,
        shell: &ShellCommand,
        cwd: &Path,
        rows: u16,
        cols: u16,
        log: OutputLog,
        events: Sender<AppEvent>,
    ) -> Result<Self, SpawnError> {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let pair = native_pty_system()
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|err| SpawnError::OpenPty(err.to_string()))?;

        let mut cmd = CommandBuilder::new(&shell.program);
        cmd.args(shell.args.iter().map(String::as_str));
        cmd.cwd(cwd);
        // Output is shown as a plain stream, so ask programs to keep it plain.
        cmd.env("TERM", "dumb");

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|err| SpawnError::Exec {
                shell: shell.program.clone(),
                message: err.to_string(),
            })?;
        drop(pair.slave);
        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|err| SpawnError::Attach(err.to_string()))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|err| SpawnError::Attach(err.to_string()))?;

        let alive = Arc::new(AtomicBool::new(true));
        {
            let log = log.clone();
            let alive = Arc::clone(&alive);
            thread::Builder::new()
                .name(format!("pty-reader-{id}"))
                .spawn(move || {
                    pump_output(reader, &log, || {
                        events.send(AppEvent::ShellOutput).is_ok()
                    });
                    alive.store(false, Ordering::SeqCst);
                    let _ = events.send(AppEvent::ShellExit(id));
                })?;
        }

        tracing::info!(id, shell = %shell.program, cwd = %cwd.display(), "shell session started");
        Ok(Self {
            id,
            log,
            alive,
            writer,
            master: pair.master,
            child,
            rows,
            cols,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    /// False once the reader has seen EOF or an I/O error.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Resize the PTY; no-op when unchanged.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        let rows = rows.max(1);
        let cols = cols.max(1);
        if rows == self.rows && cols == self.cols {
            return;
        }
        self.rows = rows;
        self.cols = cols;
        if let Err(err) = self.master.resize(PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        }) {
            tracing::debug!(id = self.id, error = %err, "pty resize failed");
        }
    }

    /// Write input bytes to the shell. Dropped when the session is dead.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() || !self.is_alive() {
            return;
        }
        if self.writer.write_all(bytes).is_ok() {
            let _ = self.writer.flush();
        }
    }

    /// Kill the shell and release the PTY.
    ///
    /// Does not wait for the reader thread; it ends on its own once the
    /// slave side is gone.
    pub fn close(self) {
        drop(self);
    }

    fn shutdown(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            if let Err(err) = self.child.kill() {
                tracing::debug!(id = self.id, error = %err, "kill shell failed");
            }
        }
        let _ = self.child.try_wait();
        tracing::info!(id = self.id, "shell session closed");
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Read `reader` to exhaustion, appending each chunk to `log` in order.
///
/// `notify` is called after every append; returning `false` stops the
/// pump. EOF and read errors end it quietly.
pub(crate) fn pump_output<R, F>(mut reader: R, log: &OutputLog, mut notify: F)
where
    R: Read,
    F: FnMut() -> bool,
{
    let mut buffer = [0u8; READ_CHUNK];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(size) => {
                log.append(&buffer[..size]);
                if !notify() {
                    break;
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::debug!(error = %err, "pty read ended");
                break;
            }
        }
    }
}
