mod command;
mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Status text is transient: it survives exactly until the next key.
    app.status_message = None;

    match app.mode {
        Mode::Normal => navigate::handle_normal(app, key),
        Mode::FieldEdit => edit::handle_field_edit(app, key),
        Mode::Command => command::handle_command(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
    }
}
