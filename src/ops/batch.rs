use std::path::PathBuf;

use crate::model::{FieldName, TagSet};
use crate::ops::cache::EditCache;

/// The transient "value I am about to apply to every marked file" map.
///
/// Active only while files are marked; created empty on entering batch
/// mode and cleared on every exit from it. Edits made in batch mode land
/// here instead of any per-file cache entry, and are evaluated once at
/// commit time.
///
/// Empty values have the opposite meaning from staged cache values: an
/// empty template field is "leave unedited" and is never applied, while
/// an empty staged value deletes the field on flush. `commit` is the
/// apply-if-present side of that split.
#[derive(Debug, Default)]
pub struct BatchTemplate {
    fields: TagSet,
}

impl BatchTemplate {
    pub fn new() -> Self {
        BatchTemplate::default()
    }

    /// Overwrite one template field. Empty values are kept (and shown)
    /// but skipped at commit.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// The template contents, for the field pane while in batch mode.
    pub fn fields(&self) -> &TagSet {
        &self.fields
    }

    /// True iff committing would stage anything.
    pub fn has_pending(&self) -> bool {
        self.fields.values().any(|v| !v.is_empty())
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Stage every non-empty template field into each target file's cache
    /// entry, overwriting prior per-file values for those fields.
    pub fn commit(&self, targets: &[PathBuf], cache: &mut EditCache) {
        for file in targets {
            for (field, value) in &self.fields {
                if !value.is_empty() {
                    cache.stage(file, *field, value.clone());
                }
            }
        }
    }
}
