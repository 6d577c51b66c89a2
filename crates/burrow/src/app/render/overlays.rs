use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::terminal::TerminalHost;

use super::super::state::App;
use super::layout::centered_rect;
use super::output::wrap_text_lines;

/// Small centered y/n prompt for deleting `name`.
pub(super) fn render_confirm_overlay(frame: &mut ratatui::Frame, area: Rect, name: &str) {
    let wanted = u16::try_from(name.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(16);
    let width = wanted.max(30).min(area.width);
    let height = 5u16.min(area.height);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, rect);
    let lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::raw(""),
        Line::styled("y / Enter to confirm", Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirm")
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        rect,
    );
}

/// Render verbatim command output, scrolled by the overlay offset.
pub(super) fn render_command_overlay<H: TerminalHost>(
    app: &App<H>,
    frame: &mut ratatui::Frame,
    area: Rect,
) {
    let overlay_rect = centered_rect(70, 60, area);
    frame.render_widget(Clear, overlay_rect);
    let inner_width = overlay_rect.width.saturating_sub(2) as usize;
    let visible = overlay_rect.height.saturating_sub(2);
    let lines = wrap_text_lines(&app.command_overlay.output, inner_width);
    let scroll = app
        .command_overlay
        .scroll
        .min(max_scroll(lines.len(), visible));
    let title = if app.command_overlay.title.is_empty() {
        "Output"
    } else {
        app.command_overlay.title.as_str()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((scroll, 0))
            .style(Style::default().bg(Color::Black)),
        overlay_rect,
    );
}

/// Largest scroll offset that still fills the view.
fn max_scroll(line_count: usize, visible: u16) -> u16 {
    u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .saturating_sub(visible)
}
