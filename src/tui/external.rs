use std::io::{self, Write};
use std::process::Command;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::AppConfig;
use crate::ops::bulk::{self, BulkReview};
use crate::tui::app::{App, ConfirmAction, ConfirmState, Mode};

#[derive(Debug, thiserror::Error)]
enum BulkEditError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("could not run '{editor}': {source}")]
    Launch { editor: String, source: io::Error },
    #[error("'{editor}' exited with {status}")]
    Exit {
        editor: String,
        status: std::process::ExitStatus,
    },
}

/// The editor used for bulk edits: config override, then $VISUAL, then
/// $EDITOR, then `vi`.
pub fn editor_command(config: &AppConfig) -> String {
    config
        .editor
        .clone()
        .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.trim().is_empty()))
        .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| "vi".to_string())
}

/// Bulk-edit the current field across the marked files through an external
/// editor round trip.
///
/// Every failure path cancels the whole edit with a status message and no
/// cache mutation; a changed, line-matching result asks for confirmation
/// before anything is staged.
pub fn run_bulk_edit(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) {
    let files = app.selection.marked_files(&app.files);
    if files.is_empty() {
        app.set_status("Bulk edit needs marked files.");
        return;
    }
    let field = app.current_field();

    match round_trip(terminal, app, field, &files) {
        Ok(BulkReview::Unchanged) => {
            app.set_status("Bulk edit: no changes.");
        }
        Ok(BulkReview::CountMismatch { expected, actual }) => {
            app.set_status(format!(
                "Bulk edit cancelled: expected {} line(s), got {}.",
                expected, actual
            ));
        }
        Ok(BulkReview::Changed(values)) => {
            app.confirm = Some(ConfirmState {
                prompt: format!(
                    "Apply bulk edit of {} to {} file(s)?",
                    field.label(),
                    files.len()
                ),
                action: ConfirmAction::ApplyBulkEdit {
                    field,
                    files,
                    values,
                },
            });
            app.mode = Mode::Confirm;
        }
        Err(e) => {
            app.set_status(format!("Bulk edit cancelled: {}", e));
        }
    }
}

/// Serialize values to a temp file, hand the terminal to the editor, read
/// the result back. The temp file is deleted on drop, so cleanup covers
/// success, cancellation and every error path alike.
fn round_trip(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &App,
    field: crate::model::FieldName,
    files: &[std::path::PathBuf],
) -> Result<BulkReview, BulkEditError> {
    let original = bulk::compose_lines(app.store.as_ref(), &app.cache, field, files);

    let mut tmp = tempfile::Builder::new()
        .prefix("tagpane-")
        .suffix(".txt")
        .tempfile()?;
    tmp.write_all(original.as_bytes())?;
    tmp.flush()?;

    let editor = editor_command(&app.config);

    suspend(terminal)?;
    let status = spawn_editor(&editor, tmp.path());
    // The terminal must come back even when the editor failed.
    resume(terminal)?;

    let status = status.map_err(|e| BulkEditError::Launch {
        editor: editor.clone(),
        source: e,
    })?;
    if !status.success() {
        return Err(BulkEditError::Exit { editor, status });
    }

    let edited = std::fs::read_to_string(tmp.path())?;
    Ok(bulk::review(&original, &edited, files.len()))
}

fn spawn_editor(editor: &str, path: &std::path::Path) -> io::Result<std::process::ExitStatus> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"))?;
    Command::new(program).args(parts).arg(path).status()
}

/// Release the terminal before the child takes over.
fn suspend(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

/// Reacquire the terminal; the child may have altered its state, so force
/// a full redraw.
fn resume(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.clear()?;
    Ok(())
}
