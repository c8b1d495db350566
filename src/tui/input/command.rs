use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use crate::model::FieldName;
use crate::ops::command::{self, Command};
use crate::tui::app::{App, Mode};

pub(super) fn handle_command(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.command_input.clear();
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            if app.command_input.pop().is_none() {
                // Backspacing over the `:` leaves command mode, like vi
                app.mode = Mode::Normal;
            }
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.mode = Mode::Normal;
            execute(app, &input);
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn execute(app: &mut App, input: &str) {
    match command::parse(input) {
        Command::Quit => app.request_quit(),
        Command::ForceQuit => app.should_quit = true,
        Command::Write => app.save(),
        Command::WriteQuit => {
            app.save();
            app.should_quit = true;
        }
        Command::TitleFromFilename => title_from_filename(app),
        Command::NumberTracks => number_tracks(app),
        Command::Unknown(cmd) => {
            app.set_status(format!("Not an editor command: {}", cmd));
        }
    }
}

/// Targets for a macro: the marked set if any, else the current file.
fn macro_targets(app: &App) -> Vec<PathBuf> {
    let marked = app.selection.marked_files(&app.files);
    if !marked.is_empty() {
        marked
    } else {
        app.current_file().cloned().into_iter().collect()
    }
}

fn title_from_filename(app: &mut App) {
    let targets = macro_targets(app);
    if targets.is_empty() {
        return;
    }
    for file in &targets {
        let title = command::title_from_filename(file);
        app.cache.stage(file, FieldName::Title, title);
    }
    app.set_status(format!(
        "Set Title from filename for {} file(s).",
        targets.len()
    ));
    app.selection.marked.clear();
    app.batch.clear();
}

fn number_tracks(app: &mut App) {
    let targets = app.selection.marked_files(&app.files);
    if targets.is_empty() {
        app.set_status("num needs marked files.");
        return;
    }
    let total = targets.len();
    for (i, file) in targets.iter().enumerate() {
        app.cache
            .stage(file, FieldName::Track, format!("{}/{}", i + 1, total));
    }
    app.set_status(format!("Numbered {} track(s).", total));
    app.selection.marked.clear();
    app.batch.clear();
}
