use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::bulk;
use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(state) = app.confirm.take() {
                apply(app, state.action);
            }
            app.mode = Mode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm = None;
            app.set_status("Bulk edit discarded.");
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn apply(app: &mut App, action: ConfirmAction) {
    match action {
        ConfirmAction::ApplyBulkEdit {
            field,
            files,
            values,
        } => {
            let count = files.len();
            bulk::apply(&mut app.cache, field, &files, &values);
            app.set_status(format!("Staged {} for {} file(s).", field.label(), count));
        }
    }
}
