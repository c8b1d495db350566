use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::load_config;
use crate::io::library::list_audio_files;
use crate::io::store::{FileStore, TagStore};
use crate::model::{AppConfig, FieldName, TagSet};
use crate::ops::{BatchTemplate, EditCache, Selection};

use super::external;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    FieldEdit,
    Command,
    Confirm,
}

/// An action that needs the terminal handle and therefore runs from the
/// event loop, after the key handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    BulkEdit,
}

/// What a pending yes/no confirmation will do on "y"
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    ApplyBulkEdit {
        field: FieldName,
        files: Vec<PathBuf>,
        values: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub prompt: String,
    pub action: ConfirmAction,
}

/// Main application state
pub struct App {
    /// The session file list, built once at startup, immutable
    pub files: Vec<PathBuf>,
    pub store: Box<dyn TagStore>,
    pub selection: Selection,
    pub cache: EditCache,
    pub batch: BatchTemplate,
    pub mode: Mode,
    /// Line buffer for FieldEdit mode
    pub edit_buffer: String,
    /// Byte offset into `edit_buffer`, always on a char boundary
    pub edit_cursor: usize,
    /// Line buffer for Command mode (without the leading `:`)
    pub command_input: String,
    pub confirm: Option<ConfirmState>,
    /// Transient status text, cleared on the next keypress
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub deferred: Option<DeferredAction>,
    pub theme: Theme,
    pub config: AppConfig,
}

impl App {
    pub fn new(files: Vec<PathBuf>, store: Box<dyn TagStore>, config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            files,
            store,
            selection: Selection::new(),
            cache: EditCache::new(),
            batch: BatchTemplate::new(),
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            command_input: String::new(),
            confirm: None,
            status_message: None,
            should_quit: false,
            deferred: None,
            theme,
            config,
        }
    }

    pub fn current_file(&self) -> Option<&PathBuf> {
        self.files.get(self.selection.file_index)
    }

    pub fn current_field(&self) -> FieldName {
        self.selection.current_field()
    }

    /// The tag set the field pane shows: the batch template while in batch
    /// mode, else the current file's effective tags.
    pub fn display_tags(&self) -> TagSet {
        if self.selection.batch_mode() {
            self.batch.fields().clone()
        } else if let Some(file) = self.current_file() {
            self.cache.effective_tags(self.store.as_ref(), file)
        } else {
            TagSet::new()
        }
    }

    /// Dirty files or an uncommitted batch template both block a plain quit.
    pub fn has_unsaved_changes(&self) -> bool {
        !self.cache.is_empty() || (self.selection.batch_mode() && self.batch.has_pending())
    }

    /// The quit gate shared by the `q` key and `:q`.
    pub fn request_quit(&mut self) {
        if self.has_unsaved_changes() {
            self.set_status("E37: No write since last change (add ! to override)");
        } else {
            self.should_quit = true;
        }
    }

    /// Commit the batch template (if batch mode is active), flush the edit
    /// cache in file-list order, report, and leave batch mode. Files whose
    /// write failed stay staged in the cache for a retry save.
    pub fn save(&mut self) {
        if self.selection.batch_mode() {
            let targets = self.selection.marked_files(&self.files);
            self.batch.commit(&targets, &mut self.cache);
        }
        let report = self.cache.flush(self.store.as_mut(), &self.files);
        self.set_status(report.status_line());
        self.batch.clear();
        self.selection.marked.clear();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

/// Run the TUI application over the audio files of `dir`
pub fn run(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let files = list_audio_files(dir)?;
    let config = load_config(dir)?;
    let mut app = App::new(files, Box::new(FileStore::new()), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);

            // Actions that suspend the terminal run here, where the
            // terminal handle is in scope.
            if let Some(action) = app.deferred.take() {
                match action {
                    DeferredAction::BulkEdit => external::run_bulk_edit(terminal, app),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
