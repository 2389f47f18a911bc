mod common;
mod edit;
mod form;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // A validation message stays visible until the next key
    app.error = None;

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::EditCell => edit::handle_edit(app, key),
        Mode::Form => form::handle_form(app, key),
    }
}
