use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_field_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => commit(app),
        KeyCode::Esc => {
            app.edit_buffer.clear();
            app.edit_cursor = 0;
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            if app.edit_cursor > 0 {
                let prev = prev_boundary(&app.edit_buffer, app.edit_cursor);
                app.edit_buffer.replace_range(prev..app.edit_cursor, "");
                app.edit_cursor = prev;
            }
        }
        KeyCode::Left => {
            app.edit_cursor = prev_boundary(&app.edit_buffer, app.edit_cursor);
        }
        KeyCode::Right => {
            app.edit_cursor = next_boundary(&app.edit_buffer, app.edit_cursor);
        }
        KeyCode::Home => {
            app.edit_cursor = 0;
        }
        KeyCode::End => {
            app.edit_cursor = app.edit_buffer.len();
        }
        // Control chords carry a base character; only printable input
        // lands in the buffer.
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Commit the buffer: into the batch template in batch mode (empty values
/// included, so a cleared template field stays visibly cleared), otherwise
/// staged into the cache for the current file.
fn commit(app: &mut App) {
    let field = app.current_field();
    let value = std::mem::take(&mut app.edit_buffer);
    if app.selection.batch_mode() {
        app.batch.set(field, value);
    } else if let Some(file) = app.current_file().cloned() {
        app.cache.stage(&file, field, value);
    }
    app.edit_cursor = 0;
    app.mode = Mode::Normal;
}

fn prev_boundary(s: &str, i: usize) -> usize {
    s[..i].chars().next_back().map(|c| i - c.len_utf8()).unwrap_or(0)
}

fn next_boundary(s: &str, i: usize) -> usize {
    s[i..].chars().next().map(|c| i + c.len_utf8()).unwrap_or(i)
}
