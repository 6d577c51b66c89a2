use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::terminal::{render_log_lines, TerminalHost};

use super::super::state::{App, Focus};

/// Draw the shell log tail and record the inner area for PTY sizing.
pub(super) fn render_shell<H: TerminalHost>(
    app: &mut App<H>,
    frame: &mut ratatui::Frame,
    area: Rect,
) {
    let Some(session) = app.shell.as_ref() else {
        app.shell_area = None;
        return;
    };
    let focused = app.focus == Focus::Shell;
    let alive = session.is_alive();
    let border = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(if focused { "Shell (focused)" } else { "Shell" });
    let inner = block.inner(area);

    let mut height = inner.height as usize;
    if !alive {
        height = height.saturating_sub(1);
    }
    let mut lines = render_log_lines(&session.log().snapshot(), height);
    if !alive {
        lines.push(Line::styled(
            "[shell exited]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
    app.shell_area = Some(inner);
}
