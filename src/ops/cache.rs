use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::io::store::{StoreError, TagStore};
use crate::model::{FieldName, FieldWrite, TagSet};

/// Pending, not-yet-persisted field edits, keyed by file.
///
/// The cache is a diff against whatever the store currently holds: a field
/// present here overrides the stored value for both display and save, and
/// fields never staged are never touched. Merging happens at flush time,
/// not at stage time, so a partial edit cannot stale-overwrite fields
/// changed elsewhere in the meantime.
#[derive(Debug, Default)]
pub struct EditCache {
    entries: HashMap<PathBuf, TagSet>,
}

/// Outcome of a flush: how many files were written, and which failed.
#[derive(Debug, Default)]
pub struct FlushReport {
    pub saved: usize,
    pub failed: Vec<(PathBuf, StoreError)>,
}

impl FlushReport {
    /// The status-row text for this outcome.
    pub fn status_line(&self) -> String {
        if self.saved == 0 && self.failed.is_empty() {
            return "No changes to save.".to_string();
        }
        let mut line = format!("Saved {} file(s).", self.saved);
        if let Some((path, err)) = self.failed.first() {
            line.push_str(&format!(
                " {} write(s) failed: {}: {}",
                self.failed.len(),
                path.display(),
                err
            ));
        }
        line
    }
}

impl EditCache {
    pub fn new() -> Self {
        EditCache::default()
    }

    /// Stage a field edit. Creates the file's entry on first use.
    /// An empty value means "delete this field on save".
    pub fn stage(&mut self, file: &Path, field: FieldName, value: impl Into<String>) {
        self.entries
            .entry(file.to_path_buf())
            .or_default()
            .insert(field, value.into());
    }

    /// True iff the cache holds an entry for this file. Entry presence is
    /// the test — an entry with an empty tag set still counts as dirty.
    pub fn is_dirty(&self, file: &Path) -> bool {
        self.entries.contains_key(file)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The staged fields for a file, if any.
    pub fn entry(&self, file: &Path) -> Option<&TagSet> {
        self.entries.get(file)
    }

    /// Drop every pending edit (forced quit).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The values a file currently shows: the stored tags overlaid
    /// field-by-field with any staged edits.
    ///
    /// A store read failure is not propagated — the base is an empty tag
    /// set, so an unreadable file stays editable and its staged edits
    /// still display.
    pub fn effective_tags(&self, store: &dyn TagStore, file: &Path) -> TagSet {
        let mut tags = store.read(file).unwrap_or_default();
        if let Some(staged) = self.entries.get(file) {
            for (field, value) in staged {
                tags.insert(*field, value.clone());
            }
        }
        tags
    }

    /// Write every pending edit to the store, visiting files in the given
    /// file-list order so repeated runs over the same pending state produce
    /// the same write sequence.
    ///
    /// Per file: read the stored tags (empty on failure), merge the staged
    /// fields on top, convert each merged field to a set-or-delete write
    /// (empty string deletes) and hand the batch to the store. A write
    /// failure keeps that file's entry staged for a retry save and does not
    /// stop the remaining files. Idempotent: with nothing staged, zero
    /// writes happen.
    pub fn flush(&mut self, store: &mut dyn TagStore, order: &[PathBuf]) -> FlushReport {
        let mut report = FlushReport::default();

        for file in order {
            let Some(staged) = self.entries.get(file) else {
                continue;
            };

            let mut merged = store.read(file).unwrap_or_default();
            for (field, value) in staged {
                merged.insert(*field, value.clone());
            }
            let writes: Vec<(FieldName, FieldWrite)> = merged
                .iter()
                .map(|(field, value)| (*field, FieldWrite::from_staged(value)))
                .collect();

            match store.write(file, &writes) {
                Ok(()) => {
                    self.entries.remove(file);
                    report.saved += 1;
                }
                Err(e) => report.failed.push((file.clone(), e)),
            }
        }

        report
    }
}
