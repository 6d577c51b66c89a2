use crossterm::event::KeyEvent;

use crate::app::state::{App, Focus};
use crate::terminal::{key_to_bytes, OutputLog, ShellCommand, ShellSession, TerminalHost};

const DEFAULT_ROWS: u16 = 24;
const DEFAULT_COLS: u16 = 80;

/// Start a shell unless one is already running. A dead session is
/// replaced.
pub fn start_shell<H: TerminalHost>(app: &mut App<H>) {
    if app.shell_alive() {
        app.set_output("Shell already running");
        return;
    }
    if let Some(old) = app.shell.take() {
        old.close();
    }

    let (rows, cols) = app
        .shell_area
        .map(|area| (area.height, area.width))
        .unwrap_or((DEFAULT_ROWS, DEFAULT_COLS));
    let command = ShellCommand {
        program: app.config.shell.command.clone(),
        args: app.config.shell.args.clone(),
    };
    app.shell_seq += 1;
    let log = OutputLog::with_limit(app.config.shell.scrollback_bytes);
    match ShellSession::spawn(
        app.shell_seq,
        &command,
        app.navigator.current_dir(),
        rows,
        cols,
        log,
        app.event_tx.clone(),
    ) {
        Ok(session) => app.shell = Some(session),
        Err(err) => {
            tracing::warn!(error = %err, "shell failed to start");
            app.set_output(err.to_string());
        }
    }
}

pub(super) fn toggle_focus<H: TerminalHost>(app: &mut App<H>) {
    app.focus = match app.focus {
        Focus::Shell => Focus::Browser,
        Focus::Browser if app.shell_alive() => Focus::Shell,
        Focus::Browser => {
            app.set_output("Shell is not running (:shell to start it)");
            Focus::Browser
        }
    };
}

pub(super) fn handle_shell_key<H: TerminalHost>(app: &mut App<H>, key: KeyEvent) {
    if !app.shell_alive() {
        app.focus = Focus::Browser;
        return;
    }
    if let (Some(bytes), Some(session)) = (key_to_bytes(key), app.shell.as_mut()) {
        session.write_bytes(&bytes);
    }
}

pub(super) fn handle_shell_exit<H: TerminalHost>(app: &mut App<H>, id: u64) {
    let current = app.shell.as_ref().map(ShellSession::id);
    if current != Some(id) {
        return;
    }
    tracing::info!(id, "shell exited");
    app.focus = Focus::Browser;
    app.set_output("Shell exited (:shell to restart)");
}

/// Match the PTY size to the pane drawn last frame.
pub fn sync_shell_size<H: TerminalHost>(app: &mut App<H>) {
    let (Some(area), Some(session)) = (app.shell_area, app.shell.as_mut()) else {
        return;
    };
    session.resize(area.height, area.width);
}
