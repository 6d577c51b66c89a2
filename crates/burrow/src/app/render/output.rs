use ratatui::text::Line;

use crate::commands::command_hint_lines;
use crate::terminal::TerminalHost;

use super::super::state::{App, OUTPUT_MAX_LINES};

/// Output area lines (command hints when typing, or output message).
pub(super) fn output_lines_owned<H: TerminalHost>(app: &App<H>, width: usize) -> Vec<Line<'static>> {
    if app.command_active {
        let hints = command_hint_lines(&app.command_input);
        if hints.is_empty() {
            return vec![Line::raw("No commands found.")];
        }
        return hints
            .into_iter()
            .take(OUTPUT_MAX_LINES)
            .map(Line::raw)
            .collect();
    }

    let Some(message) = app.output.as_ref() else {
        return Vec::new();
    };
    wrap_text_lines(message, width)
        .into_iter()
        .take(OUTPUT_MAX_LINES)
        .collect()
}

/// Hard-wrap every line at `width` characters.
pub(super) fn wrap_text_lines(message: &str, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw_line in message.lines() {
        let chars: Vec<char> = raw_line.chars().collect();
        if chars.is_empty() {
            lines.push(Line::raw(String::new()));
            continue;
        }
        for chunk in chars.chunks(width) {
            lines.push(Line::raw(chunk.iter().collect::<String>()));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_text_lines;

    fn text(lines: &[ratatui::text::Line<'static>]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn wraps_long_lines_and_keeps_blank_ones() {
        let lines = wrap_text_lines("abcdef\n\nxy", 4);
        assert_eq!(text(&lines), vec!["abcd", "ef", "", "xy"]);
    }
}
