//! Shell output rendering to ratatui lines.
//!
//! The pane shows a plain stream, not an emulated screen. SGR colour and
//! attribute sequences become styles; every other escape sequence is
//! dropped. A bare carriage return starts the current line over, which
//! keeps progress bars readable.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const TAB_WIDTH: usize = 8;

const STANDARD: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
];

const BRIGHT: [Color; 8] = [
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

#[derive(Default)]
struct LineBuf {
    cells: Vec<(char, Style)>,
}

impl LineBuf {
    fn into_line(self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut text = String::new();
        let mut style = Style::default();
        for (ch, cell_style) in self.cells {
            if cell_style != style && !text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut text), style));
            }
            style = cell_style;
            text.push(ch);
        }
        if !text.is_empty() {
            spans.push(Span::styled(text, style));
        }
        Line::from(spans)
    }
}

enum State {
    Text,
    Escape,
    Csi(String),
    /// OSC and other string sequences, terminated by BEL or ST.
    Str { saw_esc: bool },
}

/// Render the tail of the shell log as at most `height` lines.
pub fn render_log_lines(bytes: &[u8], height: usize) -> Vec<Line<'static>> {
    if height == 0 {
        return Vec::new();
    }
    let text = String::from_utf8_lossy(bytes);
    let mut lines: Vec<LineBuf> = Vec::new();
    let mut current = LineBuf::default();
    let mut pending_cr = false;
    let mut style = Style::default();
    let mut state = State::Text;

    for ch in text.chars() {
        state = match state {
            State::Text => match ch {
                '\x1b' => State::Escape,
                '\n' => {
                    pending_cr = false;
                    lines.push(std::mem::take(&mut current));
                    State::Text
                }
                '\r' => {
                    pending_cr = true;
                    State::Text
                }
                '\x08' => {
                    current.cells.pop();
                    State::Text
                }
                '\t' => {
                    take_carriage_return(&mut current, &mut pending_cr);
                    let pad = TAB_WIDTH - current.cells.len() % TAB_WIDTH;
                    current.cells.extend(std::iter::repeat((' ', style)).take(pad));
                    State::Text
                }
                c if c.is_control() => State::Text,
                c => {
                    take_carriage_return(&mut current, &mut pending_cr);
                    current.cells.push((c, style));
                    State::Text
                }
            },
            State::Escape => match ch {
                '[' => State::Csi(String::new()),
                ']' | 'P' | '_' | '^' => State::Str { saw_esc: false },
                _ => State::Text,
            },
            State::Csi(mut params) => {
                if ('\x40'..='\x7e').contains(&ch) {
                    if ch == 'm' {
                        style = apply_sgr(style, &params);
                    }
                    State::Text
                } else {
                    params.push(ch);
                    State::Csi(params)
                }
            }
            State::Str { saw_esc } => match ch {
                '\x07' => State::Text,
                '\\' if saw_esc => State::Text,
                '\x1b' => State::Str { saw_esc: true },
                _ => State::Str { saw_esc: false },
            },
        };
    }
    if !current.cells.is_empty() {
        lines.push(current);
    }

    let skip = lines.len().saturating_sub(height);
    lines.into_iter().skip(skip).map(LineBuf::into_line).collect()
}

fn take_carriage_return(current: &mut LineBuf, pending_cr: &mut bool) {
    if *pending_cr {
        current.cells.clear();
        *pending_cr = false;
    }
}

/// Apply one SGR parameter list to `style`.
fn apply_sgr(mut style: Style, params: &str) -> Style {
    if params.is_empty() {
        return Style::default();
    }
    let codes: Vec<u16> = params
        .split(';')
        .map(|part| part.parse().unwrap_or(0))
        .collect();
    let mut idx = 0;
    while idx < codes.len() {
        let code = codes[idx];
        match code {
            0 => style = Style::default(),
            1 => style = style.add_modifier(Modifier::BOLD),
            2 => style = style.add_modifier(Modifier::DIM),
            3 => style = style.add_modifier(Modifier::ITALIC),
            4 => style = style.add_modifier(Modifier::UNDERLINED),
            7 => style = style.add_modifier(Modifier::REVERSED),
            22 => style = style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => style = style.remove_modifier(Modifier::ITALIC),
            24 => style = style.remove_modifier(Modifier::UNDERLINED),
            27 => style = style.remove_modifier(Modifier::REVERSED),
            30..=37 => style = style.fg(STANDARD[usize::from(code - 30)]),
            39 => style.fg = None,
            40..=47 => style = style.bg(STANDARD[usize::from(code - 40)]),
            49 => style.bg = None,
            90..=97 => style = style.fg(BRIGHT[usize::from(code - 90)]),
            100..=107 => style = style.bg(BRIGHT[usize::from(code - 100)]),
            38 | 48 => {
                let (color, used) = extended_color(&codes[idx + 1..]);
                if let Some(color) = color {
                    style = if code == 38 {
                        style.fg(color)
                    } else {
                        style.bg(color)
                    };
                }
                idx += used;
            }
            _ => {}
        }
        idx += 1;
    }
    style
}

/// Parse `5;n` or `2;r;g;b` after a 38/48 code. Returns the colour and
/// how many parameters it consumed.
fn extended_color(rest: &[u16]) -> (Option<Color>, usize) {
    match rest {
        [5, n, ..] => (u8::try_from(*n).ok().map(Color::Indexed), 2),
        [2, r, g, b, ..] => {
            let channel = |v: u16| u8::try_from(v).unwrap_or(u8::MAX);
            (Some(Color::Rgb(channel(*r), channel(*g), channel(*b))), 4)
        }
        _ => (None, rest.len()),
    }
}
