use std::path::Path;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::handoff::{run_editor, EditorOutcome};
use crate::app::state::{App, ConfirmDelete};
use crate::browser::EnterOutcome;
use crate::keymap::matches_chord;
use crate::terminal::TerminalHost;

pub(super) fn handle_browse_key<H: TerminalHost>(app: &mut App<H>, key: KeyEvent) {
    let chords = &app.chords;
    if chords.quit.as_ref().is_some_and(|c| matches_chord(&key, c)) {
        app.should_quit = true;
        return;
    }
    if chords.refresh.as_ref().is_some_and(|c| matches_chord(&key, c)) {
        app.refresh_listing();
        app.refresh_requested = true;
        return;
    }
    if key.code == KeyCode::Delete
        || chords.delete.as_ref().is_some_and(|c| matches_chord(&key, c))
    {
        request_delete(app);
        return;
    }

    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.navigator.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.navigator.select_next(),
        KeyCode::Home | KeyCode::Char('g') => app.navigator.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.navigator.select_last(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => enter_selected(app),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => go_up(app),
        _ => return,
    }
    app.sync_selection();
}

fn enter_selected<H: TerminalHost>(app: &mut App<H>) {
    match app.navigator.enter() {
        EnterOutcome::Entered | EnterOutcome::Nothing => {}
        EnterOutcome::OpenFile(path) => open_in_editor(app, &path),
        EnterOutcome::NotOpenable { path, kind } => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let reason = match kind {
                Some(kind) => format!("{} cannot be opened", kind.label()),
                None => "broken link".to_string(),
            };
            app.set_output(format!("{name}: {reason}"));
        }
        EnterOutcome::Unreadable(err) => app.set_output(err.to_string()),
    }
}

fn go_up<H: TerminalHost>(app: &mut App<H>) {
    if let Err(err) = app.navigator.go_up() {
        app.set_output(err.to_string());
    }
}

fn request_delete<H: TerminalHost>(app: &mut App<H>) {
    let Some(entry) = app.navigator.view().selected() else {
        return;
    };
    if entry.is_parent_link() {
        app.set_output("Cannot delete the parent link");
        return;
    }
    app.confirm = Some(ConfirmDelete {
        name: entry.name().to_string(),
        file_name: entry.file_name().to_os_string(),
    });
}

/// Hand the terminal to the editor, then redraw and re-list.
pub(super) fn open_in_editor<H: TerminalHost>(app: &mut App<H>, path: &Path) {
    let editor = app.config.editor.clone();
    let gate = Arc::clone(&app.input_gate);
    let outcome = {
        let _pause = gate.pause();
        app.handoff.open(path, |target| run_editor(&editor, target))
    };

    match outcome {
        Ok(EditorOutcome::Exited(status)) => {
            if !status.success() {
                app.set_output(format!("{} exited with {status}", editor.command));
            }
        }
        Ok(EditorOutcome::SpawnFailed(err)) => {
            app.set_output(format!("Cannot start {}: {err}", editor.command));
        }
        Ok(EditorOutcome::Busy) => return,
        Err(err) if err.is_fatal() => {
            tracing::error!(error = %err, "terminal could not be restored");
            app.fatal = Some(err);
            app.should_quit = true;
            return;
        }
        Err(err) => app.set_output(err.to_string()),
    }
    app.refresh_requested = true;
    app.refresh_listing();
}
