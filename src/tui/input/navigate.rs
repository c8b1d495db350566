use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::selection::{MarkTransition, Pane};
use crate::tui::app::{App, DeferredAction, Mode};

pub(super) fn handle_normal(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => {
            app.save();
        }
        (_, KeyCode::Char('q')) => {
            app.request_quit();
        }
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => {
            app.selection.move_cursor(1, app.files.len());
        }
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => {
            app.selection.move_cursor(-1, app.files.len());
        }
        (_, KeyCode::Char('g')) => {
            app.selection.jump_top();
        }
        (_, KeyCode::Char('G')) => {
            app.selection.jump_bottom(app.files.len());
        }
        (_, KeyCode::Char('h')) | (_, KeyCode::Left) => {
            app.selection.set_pane(Pane::Files);
        }
        (_, KeyCode::Char('l')) | (_, KeyCode::Right) => {
            app.selection.set_pane(Pane::Fields);
        }
        (_, KeyCode::Char(' ')) => {
            if app.selection.pane == Pane::Files {
                toggle_mark(app);
            }
        }
        (_, KeyCode::Enter) => {
            if app.selection.pane == Pane::Fields {
                begin_field_edit(app);
            }
        }
        (_, KeyCode::Char('E')) => {
            app.deferred = Some(DeferredAction::BulkEdit);
        }
        (_, KeyCode::Char(':')) => {
            app.command_input.clear();
            app.mode = Mode::Command;
        }
        _ => {}
    }
}

/// Toggle the mark under the cursor. Entering or leaving batch mode resets
/// the batch template — it belongs to one marked set only.
fn toggle_mark(app: &mut App) {
    match app.selection.toggle_mark(app.files.len()) {
        MarkTransition::EnteredBatch | MarkTransition::LeftBatch => app.batch.clear(),
        MarkTransition::None => {}
    }
}

/// Enter FieldEdit mode with the current display value in the buffer.
fn begin_field_edit(app: &mut App) {
    if app.files.is_empty() {
        return;
    }
    let field = app.current_field();
    let value = app
        .display_tags()
        .get(&field)
        .cloned()
        .unwrap_or_default();
    app.edit_cursor = value.len();
    app.edit_buffer = value;
    app.mode = Mode::FieldEdit;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory::MemoryStore;
    use crate::model::{AppConfig, FieldName};
    use crate::tui::input::handle_key;
    use std::path::PathBuf;

    fn app_with_files(names: &[&str]) -> App {
        let files = names.iter().map(PathBuf::from).collect();
        App::new(files, Box::new(MemoryStore::new()), AppConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_marking_single_file_resets_template() {
        let mut app = app_with_files(&["a.m4a", "b.m4a"]);
        app.batch.set(FieldName::Album, "stale");

        press(&mut app, KeyCode::Char(' '));
        assert!(app.selection.batch_mode());
        assert!(!app.batch.has_pending());
    }

    #[test]
    fn test_unmarking_last_file_resets_template() {
        let mut app = app_with_files(&["a.m4a"]);
        press(&mut app, KeyCode::Char(' '));
        app.batch.set(FieldName::Album, "X");

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.selection.batch_mode());
        assert!(!app.batch.has_pending());
    }

    #[test]
    fn test_space_in_field_pane_does_not_mark() {
        let mut app = app_with_files(&["a.m4a"]);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.selection.batch_mode());
    }

    #[test]
    fn test_enter_in_field_pane_starts_edit_with_effective_value() {
        let mut app = app_with_files(&["a.m4a"]);
        app.cache.stage(&PathBuf::from("a.m4a"), FieldName::Title, "Song");

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::FieldEdit);
        assert_eq!(app.edit_buffer, "Song");
        assert_eq!(app.edit_cursor, 4);
    }

    #[test]
    fn test_enter_on_empty_library_is_noop() {
        let mut app = app_with_files(&[]);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_colon_enters_command_mode() {
        let mut app = app_with_files(&["a.m4a"]);
        app.command_input = "junk".to_string();
        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.mode, Mode::Command);
        assert!(app.command_input.is_empty());
    }

    #[test]
    fn test_bulk_edit_is_deferred_to_event_loop() {
        let mut app = app_with_files(&["a.m4a"]);
        press(&mut app, KeyCode::Char('E'));
        assert_eq!(app.deferred, Some(DeferredAction::BulkEdit));
    }

    #[test]
    fn test_keypress_clears_status() {
        let mut app = app_with_files(&["a.m4a"]);
        app.set_status("old news");
        press(&mut app, KeyCode::Char('j'));
        assert!(app.status_message.is_none());
    }
}
