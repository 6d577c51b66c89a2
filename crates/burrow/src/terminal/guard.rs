//! Terminal ownership handoff.
//!
//! While the UI runs, the controlling terminal is in raw mode on the
//! alternate screen. A full-screen foreign program needs the terminal as
//! it was before the UI took it, and the UI needs it back exactly as it
//! left it. `TerminalGuard::with_suspended_ui` sequences that:
//! 1. capture the current terminal mode
//! 2. release the screen (leave alternate screen, cooked mode)
//! 3. run the action
//! 4. restore the captured mode and reclaim the screen
//!
//! Step 4 runs exactly once per handoff, whether the action returns or
//! panics. Only one handoff may be in flight; overlapping requests are
//! answered with `Handoff::Busy` and do nothing.
//!
//! The terminal itself sits behind `TerminalHost`, so the sequence can be
//! exercised without a tty.

use std::cell::Cell;
use std::io::{self, Write};
use std::os::fd::AsFd;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use nix::sys::termios::{self, SetArg, Termios};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("cannot query terminal state: {0}")]
    Capture(io::Error),
    #[error("cannot release terminal: {0}")]
    Suspend(io::Error),
    #[error("cannot restore terminal state: {0}")]
    Restore(io::Error),
    #[error("cannot resume terminal UI: {0}")]
    Resume(io::Error),
}

impl TerminalError {
    /// Restore and resume failures leave the terminal in an unknown mode.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TerminalError::Restore(_) | TerminalError::Resume(_))
    }
}

/// The four primitive terminal operations a handoff needs.
pub trait TerminalHost {
    type Snapshot;

    fn capture(&self) -> Result<Self::Snapshot, TerminalError>;
    fn release(&self) -> Result<(), TerminalError>;
    fn restore(&self, snapshot: &Self::Snapshot) -> Result<(), TerminalError>;
    fn reclaim(&self) -> Result<(), TerminalError>;
}

/// Raw-mode configuration of the controlling terminal (stdin).
#[derive(Clone)]
pub struct TerminalSnapshot(Termios);

/// The process's real controlling terminal.
#[derive(Debug, Default)]
pub struct CrosstermHost;

impl TerminalHost for CrosstermHost {
    type Snapshot = TerminalSnapshot;

    fn capture(&self) -> Result<TerminalSnapshot, TerminalError> {
        let stdin = io::stdin();
        termios::tcgetattr(stdin.as_fd())
            .map(TerminalSnapshot)
            .map_err(|errno| TerminalError::Capture(errno.into()))
    }

    fn release(&self) -> Result<(), TerminalError> {
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, Show).map_err(TerminalError::Suspend)?;
        disable_raw_mode().map_err(TerminalError::Suspend)?;
        stdout.flush().map_err(TerminalError::Suspend)
    }

    fn restore(&self, snapshot: &TerminalSnapshot) -> Result<(), TerminalError> {
        // Let crossterm record raw mode as on again, then put back the exact
        // flags we captured.
        enable_raw_mode().map_err(TerminalError::Restore)?;
        let stdin = io::stdin();
        termios::tcsetattr(stdin.as_fd(), SetArg::TCSADRAIN, &snapshot.0)
            .map_err(|errno| TerminalError::Restore(errno.into()))
    }

    fn reclaim(&self) -> Result<(), TerminalError> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))
            .map_err(TerminalError::Resume)
    }
}

/// Result of a handoff request.
#[derive(Debug, PartialEq, Eq)]
pub enum Handoff<T> {
    Completed(T),
    /// Another handoff was already in flight; nothing ran.
    Busy,
}

/// Single owner of the terminal handoff.
///
/// Create one per process and pass it to whoever needs to run a
/// foreground child.
pub struct TerminalGuard<H: TerminalHost> {
    host: H,
    in_flight: Cell<bool>,
}

impl<H: TerminalHost> TerminalGuard<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            in_flight: Cell::new(false),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.get()
    }

    pub fn capture_state(&self) -> Result<H::Snapshot, TerminalError> {
        self.host.capture()
    }

    /// Run `action` with the terminal released to whatever it spawns.
    pub fn with_suspended_ui<T>(
        &self,
        action: impl FnOnce() -> T,
    ) -> Result<Handoff<T>, TerminalError> {
        if self.in_flight.replace(true) {
            tracing::warn!("terminal handoff already in flight, ignoring request");
            return Ok(Handoff::Busy);
        }
        let mut pending = PendingRestore {
            guard: self,
            snapshot: None,
        };
        pending.snapshot = Some(self.host.capture()?);
        if let Err(err) = self.host.release() {
            pending.finish()?;
            return Err(err);
        }
        tracing::debug!("terminal released to foreground child");

        let value = action();

        pending.finish()?;
        tracing::debug!("terminal reclaimed by UI");
        Ok(Handoff::Completed(value))
    }
}

/// Puts the terminal back when dropped, unless already finished.
struct PendingRestore<'a, H: TerminalHost> {
    guard: &'a TerminalGuard<H>,
    snapshot: Option<H::Snapshot>,
}

impl<H: TerminalHost> PendingRestore<'_, H> {
    fn finish(&mut self) -> Result<(), TerminalError> {
        let Some(snapshot) = self.snapshot.take() else {
            self.guard.in_flight.set(false);
            return Ok(());
        };
        let restored = self.guard.host.restore(&snapshot);
        let resumed = self.guard.host.reclaim();
        self.guard.in_flight.set(false);
        restored.and(resumed)
    }
}

impl<H: TerminalHost> Drop for PendingRestore<'_, H> {
    fn drop(&mut self) {
        if let Err(err) = self.finish() {
            tracing::error!(error = %err, "terminal restore during unwind failed");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::RecordingHost;
    use super::{Handoff, TerminalError, TerminalGuard};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn handoff_runs_steps_in_order() {
        let guard = TerminalGuard::new(RecordingHost::default());
        let result = guard.with_suspended_ui(|| 7).expect("handoff");
        assert_eq!(result, Handoff::Completed(7));
        assert_eq!(
            *guard.host().calls.borrow(),
            vec!["capture", "release", "restore", "reclaim"]
        );
        assert!(!guard.in_flight());
    }

    #[test]
    fn nested_handoff_is_rejected() {
        let guard = TerminalGuard::new(RecordingHost::default());
        let mut inner_runs = 0;
        let outer = guard
            .with_suspended_ui(|| {
                assert!(guard.in_flight());
                let inner = guard.with_suspended_ui(|| inner_runs += 1).expect("inner");
                assert_eq!(inner, Handoff::Busy);
            })
            .expect("outer");
        assert_eq!(outer, Handoff::Completed(()));
        assert_eq!(inner_runs, 0);
        assert_eq!(guard.host().count("capture"), 1);
        assert_eq!(guard.host().count("restore"), 1);
        assert!(!guard.in_flight());
    }

    #[test]
    fn restore_runs_once_when_action_fails() {
        let guard = TerminalGuard::new(RecordingHost::default());
        let result: Result<(), &str> = match guard
            .with_suspended_ui(|| Err("child exited 1"))
            .expect("handoff")
        {
            Handoff::Completed(value) => value,
            Handoff::Busy => panic!("unexpected busy"),
        };
        assert!(result.is_err());
        assert_eq!(guard.host().count("restore"), 1);
        assert_eq!(guard.host().count("reclaim"), 1);
    }

    #[test]
    fn restore_runs_once_when_action_panics() {
        let guard = TerminalGuard::new(RecordingHost::default());
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _ = guard.with_suspended_ui(|| panic!("editor blew up"));
        }));
        assert!(outcome.is_err());
        assert_eq!(guard.host().count("restore"), 1);
        assert_eq!(guard.host().count("reclaim"), 1);
        assert!(!guard.in_flight());
    }

    #[test]
    fn capture_failure_skips_action_and_clears_flag() {
        let host = RecordingHost::default();
        host.fail_capture.set(true);
        let guard = TerminalGuard::new(host);
        let mut ran = false;
        let err = guard.with_suspended_ui(|| ran = true).unwrap_err();
        assert!(matches!(err, TerminalError::Capture(_)));
        assert!(!ran);
        assert_eq!(guard.host().count("restore"), 0);
        assert!(!guard.in_flight());
    }

    #[test]
    fn release_failure_still_restores() {
        let host = RecordingHost::default();
        host.fail_release.set(true);
        let guard = TerminalGuard::new(host);
        let mut ran = false;
        let err = guard.with_suspended_ui(|| ran = true).unwrap_err();
        assert!(matches!(err, TerminalError::Suspend(_)));
        assert!(!ran);
        assert_eq!(guard.host().count("restore"), 1);
        assert!(!guard.in_flight());
    }

    #[test]
    fn restore_failure_is_fatal() {
        let host = RecordingHost::default();
        host.fail_restore.set(true);
        let guard = TerminalGuard::new(host);
        let err = guard.with_suspended_ui(|| ()).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(guard.host().count("restore"), 1);
        assert_eq!(guard.host().count("reclaim"), 1);
        assert!(!guard.in_flight());
    }
}
