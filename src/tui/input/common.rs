use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::QuickDeadline;

pub(super) fn prev_char_boundary(s: &str, at: usize) -> usize {
    s[..at].char_indices().last().map(|(i, _)| i).unwrap_or(0)
}

pub(super) fn next_char_boundary(s: &str, at: usize) -> usize {
    s[at..].chars().next().map(|c| at + c.len_utf8()).unwrap_or(at)
}

/// Apply a key to a single-line edit buffer. Returns true if the key was
/// consumed as a text-editing key.
pub(super) fn handle_text_key(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
            true
        }
        KeyCode::Backspace => {
            if *cursor > 0 {
                let prev = prev_char_boundary(buffer, *cursor);
                buffer.remove(prev);
                *cursor = prev;
            }
            true
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                buffer.remove(*cursor);
            }
            true
        }
        KeyCode::Left => {
            *cursor = prev_char_boundary(buffer, *cursor);
            true
        }
        KeyCode::Right => {
            *cursor = next_char_boundary(buffer, *cursor);
            true
        }
        KeyCode::Home => {
            *cursor = 0;
            true
        }
        KeyCode::End => {
            *cursor = buffer.len();
            true
        }
        _ => false,
    }
}

/// Quick-deadline presets on ctrl keys while editing a date
pub(super) fn quick_deadline_key(key: KeyEvent) -> Option<QuickDeadline> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('t') => Some(QuickDeadline::Tomorrow),
        KeyCode::Char('f') => Some(QuickDeadline::Friday),
        KeyCode::Char('n') => Some(QuickDeadline::NextMonday),
        _ => None,
    }
}

/// Resolve a preset against today's date, as YYYY-MM-DD
pub(super) fn quick_deadline_value(preset: QuickDeadline) -> String {
    preset
        .resolve(Local::now().date_naive())
        .format("%Y-%m-%d")
        .to_string()
}
