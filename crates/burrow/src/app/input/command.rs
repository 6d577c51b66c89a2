use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::commands::{complete_command_input, parse_command, run_command, AppAction};
use crate::terminal::TerminalHost;

use super::shell::start_shell;
use crate::app::state::App;

pub(super) fn handle_command_input<H: TerminalHost>(app: &mut App<H>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.command_active = false;
            app.command_input.clear();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.command_active = false;
            execute_command(app, &input);
        }
        KeyCode::Tab => {
            if let Some(completed) = complete_command_input(&app.command_input) {
                app.command_input = completed;
            }
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.command_active = false;
            }
        }
        KeyCode::Char(ch) => {
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
            {
                app.command_input.push(ch);
            }
        }
        _ => {}
    }
}

pub(super) fn open_command<H: TerminalHost>(app: &mut App<H>) {
    app.command_active = true;
    app.command_input = ":".to_string();
}

pub(super) fn execute_command<H: TerminalHost>(app: &mut App<H>, raw: &str) {
    let parsed = match parse_command(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            app.set_output(err.to_string());
            return;
        }
    };

    let result = run_command(&parsed, &mut app.navigator);
    match result.action {
        None => {
            app.set_output(result.message);
            app.invalidate_details();
        }
        Some(AppAction::ShowText { title }) => {
            if result.message.trim().is_empty() {
                app.set_output(format!("{title}: no output"));
                return;
            }
            let overlay = &mut app.command_overlay;
            overlay.visible = true;
            overlay.title = format!("{title} (Esc to close)");
            overlay.output = result.message;
            overlay.scroll = 0;
        }
        Some(AppAction::StartShell) => start_shell(app),
        Some(AppAction::Refresh) => {
            app.refresh_listing();
            app.refresh_requested = true;
            app.set_output("Refreshed");
        }
        Some(AppAction::Quit) => app.should_quit = true,
    }
}
