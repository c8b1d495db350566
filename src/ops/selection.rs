use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::model::FieldName;

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Files,
    Fields,
}

/// Reported by [`Selection::toggle_mark`] so the caller can reset the
/// batch template exactly when batch mode is entered or left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkTransition {
    /// Mark count went 0 → 1
    EnteredBatch,
    /// Mark count went >0 → 0
    LeftBatch,
    None,
}

/// Cursor, focus and mark state over the immutable session file list.
///
/// Marks are indices into the file list, kept in a `BTreeSet` so every
/// batch operation visits files in file-list order.
#[derive(Debug, Clone)]
pub struct Selection {
    pub file_index: usize,
    pub field_index: usize,
    pub pane: Pane,
    pub marked: BTreeSet<usize>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            file_index: 0,
            field_index: 0,
            pane: Pane::Files,
            marked: BTreeSet::new(),
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Move the cursor in the active pane. Clamps at list ends, never
    /// wraps. With an empty file list this is a no-op.
    pub fn move_cursor(&mut self, delta: isize, file_count: usize) {
        if file_count == 0 {
            return;
        }
        match self.pane {
            Pane::Files => {
                self.file_index = step(self.file_index, delta, file_count);
            }
            Pane::Fields => {
                self.field_index = step(self.field_index, delta, FieldName::ALL.len());
            }
        }
    }

    /// Jump the active pane's cursor to the first entry.
    pub fn jump_top(&mut self) {
        match self.pane {
            Pane::Files => self.file_index = 0,
            Pane::Fields => self.field_index = 0,
        }
    }

    /// Jump the active pane's cursor to the last entry.
    pub fn jump_bottom(&mut self, file_count: usize) {
        match self.pane {
            Pane::Files => self.file_index = file_count.saturating_sub(1),
            Pane::Fields => self.field_index = FieldName::ALL.len() - 1,
        }
    }

    /// Toggle the mark on the current file. No-op on an empty file list.
    pub fn toggle_mark(&mut self, file_count: usize) -> MarkTransition {
        if file_count == 0 || self.file_index >= file_count {
            return MarkTransition::None;
        }
        let was_empty = self.marked.is_empty();
        if !self.marked.remove(&self.file_index) {
            self.marked.insert(self.file_index);
        }
        if was_empty && !self.marked.is_empty() {
            MarkTransition::EnteredBatch
        } else if !was_empty && self.marked.is_empty() {
            MarkTransition::LeftBatch
        } else {
            MarkTransition::None
        }
    }

    /// Switch keyboard focus. Selection state is untouched.
    pub fn set_pane(&mut self, pane: Pane) {
        self.pane = pane;
    }

    /// Batch mode is active whenever at least one file is marked.
    pub fn batch_mode(&self) -> bool {
        !self.marked.is_empty()
    }

    /// The current field, in display order.
    pub fn current_field(&self) -> FieldName {
        FieldName::ALL[self.field_index.min(FieldName::ALL.len() - 1)]
    }

    /// The marked files, in file-list order.
    pub fn marked_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        self.marked
            .iter()
            .filter_map(|&i| files.get(i).cloned())
            .collect()
    }

}

fn step(index: usize, delta: isize, len: usize) -> usize {
    let target = index as isize + delta;
    target.clamp(0, len as isize - 1) as usize
}
