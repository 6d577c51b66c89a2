//! Key chord parsing and matching.
//!
//! Parses key chord strings like "ctrl+g" or "delete" from config
//! and matches them against crossterm KeyEvents at runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyChord {
    fn plain(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }
}

pub fn parse_key_chord(input: &str) -> Option<KeyChord> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }
    // A lone "+" is the plus key, not a separator.
    if trimmed == "+" {
        return Some(KeyChord::plain(KeyCode::Char('+')));
    }

    let mut chord = KeyChord::plain(KeyCode::Null);
    for part in trimmed.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part {
            "ctrl" | "control" => chord.ctrl = true,
            "alt" | "option" | "meta" => chord.alt = true,
            "shift" => chord.shift = true,
            key => {
                if chord.key != KeyCode::Null {
                    return None;
                }
                chord.key = parse_key(key)?;
            }
        }
    }

    if chord.key == KeyCode::Null {
        return None;
    }
    Some(chord)
}

fn parse_key(key: &str) -> Option<KeyCode> {
    match key {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "space" | "spacebar" => Some(KeyCode::Char(' ')),
        "delete" | "del" => Some(KeyCode::Delete),
        "backspace" => Some(KeyCode::Backspace),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        _ => {
            let mut chars = key.chars();
            let first = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(first))
            } else {
                None
            }
        }
    }
}

pub fn matches_chord(event: &KeyEvent, chord: &KeyChord) -> bool {
    let modifiers = event.modifiers;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT) || modifiers.contains(KeyModifiers::META);
    let shift = modifiers.contains(KeyModifiers::SHIFT);

    let code = match event.code {
        KeyCode::Char(ch) if ctrl => KeyCode::Char(ch.to_ascii_lowercase()),
        other => other,
    };
    if code != chord.key {
        return false;
    }
    // Terminals disagree on whether shifted symbols carry SHIFT; a
    // character chord without an explicit shift ignores it.
    let shift_ok = match chord.key {
        KeyCode::Char(_) if !chord.shift => true,
        _ => shift == chord.shift,
    };
    ctrl == chord.ctrl && alt == chord.alt && shift_ok
}
