use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::terminal::TerminalHost;

use super::super::state::{App, Details};

const LABEL_WIDTH: usize = 9;

/// Metadata on top, git history below.
pub(super) fn render_details<H: TerminalHost>(
    app: &App<H>,
    frame: &mut ratatui::Frame,
    area: Rect,
) {
    let meta_lines: Vec<Line<'static>> = match &app.details {
        Details::Empty => Vec::new(),
        Details::Rows(rows) => rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<LABEL_WIDTH$}", row.label),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(row.value.clone()),
                ])
            })
            .collect(),
        Details::Error(message) => {
            vec![Line::styled(message.clone(), Style::default().fg(Color::Red))]
        }
    };

    let meta_height = (meta_lines.len() as u16 + 2).min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(meta_height), Constraint::Min(0)])
        .split(area);

    let meta = Paragraph::new(meta_lines)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: false });
    frame.render_widget(meta, chunks[0]);

    let log_lines: Vec<Line<'static>> = if app.git_log.is_empty() {
        vec![Line::styled(
            "no history",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        app.git_log
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        entry.hash.clone(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::raw(entry.summary.clone()),
                ])
            })
            .collect()
    };
    let log = Paragraph::new(log_lines)
        .block(Block::default().borders(Borders::ALL).title("Git log"));
    frame.render_widget(log, chunks[1]);
}
