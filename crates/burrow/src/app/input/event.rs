use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::events::AppEvent;
use crate::keymap::matches_chord;
use crate::terminal::TerminalHost;

use super::browse::handle_browse_key;
use super::command::handle_command_input;
use super::overlay::{handle_command_overlay_key, handle_confirm_key};
use super::shell::{handle_shell_exit, handle_shell_key, toggle_focus};
use crate::app::state::{App, Focus};

/// Main event dispatcher.
pub fn handle_event<H: TerminalHost>(app: &mut App<H>, event: AppEvent) {
    match event {
        AppEvent::Input(key) => handle_key(app, key),
        // The next draw picks up the new size.
        AppEvent::Resize => {}
        // Output is already in the session log; the redraw shows it.
        AppEvent::ShellOutput => {}
        AppEvent::ShellExit(id) => handle_shell_exit(app, id),
        AppEvent::GitLogUpdated { path, entries } => {
            if app.details_path.as_deref() == Some(path.as_path()) {
                app.git_log = entries;
            } else {
                tracing::trace!(path = %path.display(), "dropping stale git log");
            }
        }
    }
}

pub(super) fn handle_key<H: TerminalHost>(app: &mut App<H>, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if app.command_overlay.visible {
        handle_command_overlay_key(app, key);
        return;
    }
    if app.confirm.is_some() {
        handle_confirm_key(app, key);
        return;
    }
    if app.command_active {
        handle_command_input(app, key);
        return;
    }

    if let Some(chord) = &app.chords.toggle_focus {
        if matches_chord(&key, chord) {
            toggle_focus(app);
            return;
        }
    }

    if app.focus == Focus::Shell {
        handle_shell_key(app, key);
        return;
    }

    if key.code == KeyCode::Char(':') {
        super::command::open_command(app);
        return;
    }
    handle_browse_key(app, key);
}
