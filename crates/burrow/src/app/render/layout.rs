use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::terminal::TerminalHost;

use super::super::state::{App, Focus};

/// Render horizontal separator.
pub(super) fn render_separator(frame: &mut ratatui::Frame, area: Rect) {
    let separator = Paragraph::new(Line::raw(dashed_line(area.width as usize))).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    );
    frame.render_widget(separator, area);
}

/// Render command bar (focus indicator or input), with the version on
/// the right when there is room.
pub(super) fn render_command_bar<H: TerminalHost>(
    app: &App<H>,
    frame: &mut ratatui::Frame,
    area: Rect,
) {
    let label_text = format!("burrow v{}", env!("CARGO_PKG_VERSION"));
    let label_len = label_text.chars().count();
    if (area.width as usize) <= label_len + 1 {
        frame.render_widget(Paragraph::new(command_line(app)), area);
        return;
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length((label_len + 1) as u16),
        ])
        .split(area);
    frame.render_widget(Paragraph::new(command_line(app)), chunks[0]);
    let dim_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);
    let label = Paragraph::new(Line::from(Span::styled(label_text, dim_style)))
        .alignment(Alignment::Right);
    frame.render_widget(label, chunks[1]);
}

fn command_line<H: TerminalHost>(app: &App<H>) -> Line<'_> {
    if app.command_active {
        return Line::from(vec![
            Span::styled(app.command_input.clone(), Style::default().fg(Color::White)),
            Span::styled(" ", Style::default().bg(Color::White).fg(Color::Black)),
        ]);
    }
    let (label, style) = match app.focus {
        Focus::Browser => ("-- BROWSE --", Style::default().fg(Color::DarkGray)),
        Focus::Shell => (
            "-- SHELL --",
            Style::default().bg(Color::Green).fg(Color::Black),
        ),
    };
    Line::from(vec![Span::styled(label, style)])
}

/// Dashed separator line.
fn dashed_line(width: usize) -> String {
    "- ".chars().cycle().take(width).collect()
}

/// Inset a rect horizontally by padding on each side.
pub(super) fn inset_horizontal(area: Rect, padding: u16) -> Rect {
    if area.width <= padding * 2 {
        return area;
    }
    Rect {
        x: area.x + padding,
        width: area.width - padding * 2,
        ..area
    }
}

/// Create a centered rect with given percentage of parent.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    let x = r.x + (r.width.saturating_sub(popup_width)) / 2;
    let y = r.y + (r.height.saturating_sub(popup_height)) / 2;
    Rect::new(x, y, popup_width, popup_height)
}

#[cfg(test)]
mod tests {
    use super::{centered_rect, dashed_line, inset_horizontal};
    use ratatui::layout::Rect;

    #[test]
    fn dashed_line_has_exact_width() {
        assert_eq!(dashed_line(5), "- - -");
        assert_eq!(dashed_line(0), "");
    }

    #[test]
    fn rect_helpers() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(inset_horizontal(area, 1), Rect::new(1, 0, 98, 40));
        assert_eq!(centered_rect(50, 50, area), Rect::new(25, 10, 50, 20));
    }
}
