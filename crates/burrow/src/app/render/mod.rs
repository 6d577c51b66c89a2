//! UI rendering methods.
//!
//! Handles all drawing for the TUI:
//! - Main layout (work area, separator, output, command bar)
//! - Work area panes (listing, details and history, shell)
//! - Overlays (delete confirmation, command output)

mod browser;
mod details;
mod layout;
mod output;
mod overlays;
mod shell;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::terminal::TerminalHost;

use super::state::{App, BOTTOM_HORIZONTAL_PADDING};

/// Main render entry point. Called each frame by the event loop.
pub fn render<H: TerminalHost>(app: &mut App<H>, frame: &mut ratatui::Frame) {
    let area = frame.area();
    let output_width = area
        .width
        .saturating_sub(BOTTOM_HORIZONTAL_PADDING.saturating_mul(2)) as usize;
    let output_lines = output::output_lines_owned(app, output_width);
    let output_height = output_lines.len() as u16;

    // Vertical layout: work area | separator | output | command bar
    let split_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(output_height),
            Constraint::Length(1),
        ])
        .split(area);

    render_work_area(app, frame, split_chunks[0]);
    layout::render_separator(frame, split_chunks[1]);

    if output_height > 0 {
        let output_area = layout::inset_horizontal(split_chunks[2], BOTTOM_HORIZONTAL_PADDING);
        let output = Paragraph::new(output_lines).style(Style::default().fg(Color::Gray));
        frame.render_widget(output, output_area);
    }

    let command_area = layout::inset_horizontal(split_chunks[3], BOTTOM_HORIZONTAL_PADDING);
    layout::render_command_bar(app, frame, command_area);

    if let Some(confirm) = &app.confirm {
        overlays::render_confirm_overlay(frame, area, &confirm.name);
    }
    if app.command_overlay.visible {
        overlays::render_command_overlay(app, frame, area);
    }
}

/// Listing and details side by side, shell underneath when present.
fn render_work_area<H: TerminalHost>(app: &mut App<H>, frame: &mut ratatui::Frame, area: Rect) {
    let (top, shell_area) = if app.shell.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Percentage(40)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(top);
    browser::render_listing(app, frame, columns[0]);
    details::render_details(app, frame, columns[1]);

    match shell_area {
        Some(shell_area) => shell::render_shell(app, frame, shell_area),
        None => app.shell_area = None,
    }
}
