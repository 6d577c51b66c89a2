use crossterm::event::{KeyCode, KeyEvent};

use crate::app::state::App;
use crate::terminal::TerminalHost;

const PAGE: u16 = 10;

pub(super) fn handle_command_overlay_key<H: TerminalHost>(app: &mut App<H>, key: KeyEvent) {
    let overlay = &mut app.command_overlay;
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            overlay.visible = false;
            overlay.output.clear();
            overlay.title.clear();
            overlay.scroll = 0;
        }
        KeyCode::Down | KeyCode::Char('j') => overlay.scroll = overlay.scroll.saturating_add(1),
        KeyCode::Up | KeyCode::Char('k') => overlay.scroll = overlay.scroll.saturating_sub(1),
        KeyCode::PageDown => overlay.scroll = overlay.scroll.saturating_add(PAGE),
        KeyCode::PageUp => overlay.scroll = overlay.scroll.saturating_sub(PAGE),
        KeyCode::Home => overlay.scroll = 0,
        _ => {}
    }
}

pub(super) fn handle_confirm_key<H: TerminalHost>(app: &mut App<H>, key: KeyEvent) {
    let Some(confirm) = app.confirm.take() else {
        return;
    };
    if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter) {
        app.set_output("Delete cancelled");
        return;
    }
    tracing::debug!(name = %confirm.name, "delete confirmed");
    if !app.navigator.select_file_name(&confirm.file_name) {
        app.set_output(format!("{} is no longer listed", confirm.name));
        app.refresh_listing();
        return;
    }
    match app.navigator.delete_selected() {
        Ok(name) => app.set_output(format!("Deleted {name}")),
        Err(err) => {
            app.set_output(err.to_string());
            // The entry may have changed underneath us.
            app.refresh_listing();
        }
    }
    app.invalidate_details();
}
