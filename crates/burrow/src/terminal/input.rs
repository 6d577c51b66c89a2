//! Key encoding for the shell pane.
//!
//! The shell runs with `TERM=dumb`, so only the plain cursor and editing
//! sequences are produced. Modified cursor keys fall back to the
//! xterm `CSI 1;<mod>` form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Bytes to write to the PTY for `key`, or `None` for keys with no
/// terminal encoding (function keys, media keys, ...).
pub fn key_to_bytes(key: KeyEvent) -> Option<Vec<u8>> {
    let mods = key.modifiers;
    let bytes = match key.code {
        KeyCode::Char(ch) if mods.contains(KeyModifiers::CONTROL) => control_char(ch),
        KeyCode::Char(ch) => ch.to_string().into_bytes(),
        KeyCode::Enter => vec![b'\r'],
        KeyCode::Tab => vec![b'\t'],
        KeyCode::BackTab => return Some(b"\x1b[Z".to_vec()),
        KeyCode::Backspace => vec![0x7f],
        KeyCode::Esc => vec![0x1b],
        KeyCode::Up => return Some(cursor(mods, 'A')),
        KeyCode::Down => return Some(cursor(mods, 'B')),
        KeyCode::Right => return Some(cursor(mods, 'C')),
        KeyCode::Left => return Some(cursor(mods, 'D')),
        KeyCode::Home => return Some(cursor(mods, 'H')),
        KeyCode::End => return Some(cursor(mods, 'F')),
        KeyCode::Delete => return Some(b"\x1b[3~".to_vec()),
        KeyCode::PageUp => return Some(b"\x1b[5~".to_vec()),
        KeyCode::PageDown => return Some(b"\x1b[6~".to_vec()),
        _ => return None,
    };
    if mods.contains(KeyModifiers::ALT) {
        let mut prefixed = Vec::with_capacity(bytes.len() + 1);
        prefixed.push(0x1b);
        prefixed.extend(bytes);
        return Some(prefixed);
    }
    Some(bytes)
}

fn control_char(ch: char) -> Vec<u8> {
    match ch.to_ascii_lowercase() {
        letter @ 'a'..='z' => vec![letter as u8 - b'a' + 1],
        ' ' | '@' | '2' => vec![0],
        '[' => vec![0x1b],
        '\\' => vec![0x1c],
        ']' => vec![0x1d],
        other => other.to_string().into_bytes(),
    }
}

fn cursor(mods: KeyModifiers, final_byte: char) -> Vec<u8> {
    let mut param = 1;
    if mods.contains(KeyModifiers::SHIFT) {
        param += 1;
    }
    if mods.contains(KeyModifiers::ALT) {
        param += 2;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        param += 4;
    }
    if param == 1 {
        format!("\x1b[{final_byte}").into_bytes()
    } else {
        format!("\x1b[1;{param}{final_byte}").into_bytes()
    }
}
