use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::browser::{DirEntry, EntryKind};
use crate::terminal::TerminalHost;

use super::super::state::{App, Focus};

/// Icon and colour per entry kind.
fn kind_style(kind: EntryKind) -> (&'static str, Style) {
    match kind {
        EntryKind::Directory => (
            "▸ ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        EntryKind::RegularFile => ("  ", Style::default()),
        EntryKind::Symlink => ("→ ", Style::default().fg(Color::Cyan)),
        EntryKind::NamedPipe => ("| ", Style::default().fg(Color::Yellow)),
        EntryKind::Socket => ("= ", Style::default().fg(Color::Magenta)),
        EntryKind::Device => ("# ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    }
}

fn entry_line(entry: &DirEntry) -> Line<'static> {
    let (icon, style) = kind_style(entry.kind());
    let mut name = entry.name().to_string();
    if entry.kind().is_directory() && !entry.is_parent_link() {
        name.push('/');
    }
    Line::from(vec![Span::styled(icon, style), Span::styled(name, style)])
}

pub(super) fn render_listing<H: TerminalHost>(
    app: &App<H>,
    frame: &mut ratatui::Frame,
    area: Rect,
) {
    let view = app.navigator.view();
    let focused = app.focus == Focus::Browser;
    let border = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(view.path().display().to_string());

    if view.entries().is_empty() {
        let empty = Paragraph::new(Line::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .entries()
        .iter()
        .map(|entry| ListItem::new(entry_line(entry)))
        .collect();
    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(view.selected_index()));
    frame.render_stateful_widget(list, area, &mut state);
}
