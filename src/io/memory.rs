use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::io::store::{StoreError, TagStore};
use crate::model::{FieldName, FieldWrite, TagSet};

/// In-memory tag store for tests.
///
/// Failures are injectable per path, and every successful write is
/// appended to `write_log`, so tests can assert flush ordering and
/// idempotency (zero writes on a second flush) directly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: HashMap<PathBuf, TagSet>,
    fail_reads: HashSet<PathBuf>,
    fail_writes: HashSet<PathBuf>,
    /// Paths written, in call order.
    pub write_log: Vec<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed a file with stored tags.
    pub fn insert(&mut self, path: impl Into<PathBuf>, tags: TagSet) {
        self.files.insert(path.into(), tags);
    }

    /// Make reads of `path` fail (an unreadable container).
    pub fn fail_reads_for(&mut self, path: impl Into<PathBuf>) {
        self.fail_reads.insert(path.into());
    }

    /// Make writes to `path` fail.
    pub fn fail_writes_for(&mut self, path: impl Into<PathBuf>) {
        self.fail_writes.insert(path.into());
    }

    /// Let previously failing writes to `path` succeed again.
    pub fn heal_writes_for(&mut self, path: &Path) {
        self.fail_writes.remove(path);
    }

    /// The stored tags for `path`, if the file exists in the store.
    pub fn stored(&self, path: &Path) -> Option<&TagSet> {
        self.files.get(path)
    }
}

impl TagStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<TagSet, StoreError> {
        if self.fail_reads.contains(path) {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                reason: "unreadable container".to_string(),
            });
        }
        Ok(self.files.get(path).cloned().unwrap_or_default())
    }

    fn write(&mut self, path: &Path, writes: &[(FieldName, FieldWrite)]) -> Result<(), StoreError> {
        if self.fail_writes.contains(path) {
            return Err(StoreError::Write {
                path: path.to_path_buf(),
                reason: "write refused".to_string(),
            });
        }
        let tags = self.files.entry(path.to_path_buf()).or_default();
        for (field, write) in writes {
            match write {
                FieldWrite::Set(value) => {
                    tags.insert(*field, value.clone());
                }
                FieldWrite::Delete => {
                    tags.remove(field);
                }
            }
        }
        self.write_log.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_leaves_unlisted_fields_untouched() {
        let mut store = MemoryStore::new();
        let mut tags = TagSet::new();
        tags.insert(FieldName::Artist, "Ayler".to_string());
        store.insert("a.m4a", tags);

        store
            .write(
                Path::new("a.m4a"),
                &[(FieldName::Title, FieldWrite::Set("Ghosts".to_string()))],
            )
            .unwrap();

        let stored = store.stored(Path::new("a.m4a")).unwrap();
        assert_eq!(stored.get(&FieldName::Artist).unwrap(), "Ayler");
        assert_eq!(stored.get(&FieldName::Title).unwrap(), "Ghosts");
    }

    #[test]
    fn test_delete_removes_field() {
        let mut store = MemoryStore::new();
        let mut tags = TagSet::new();
        tags.insert(FieldName::Genre, "Jazz".to_string());
        store.insert("a.m4a", tags);

        store
            .write(Path::new("a.m4a"), &[(FieldName::Genre, FieldWrite::Delete)])
            .unwrap();

        assert!(
            store
                .stored(Path::new("a.m4a"))
                .unwrap()
                .get(&FieldName::Genre)
                .is_none()
        );
    }

    #[test]
    fn test_injected_failures() {
        let mut store = MemoryStore::new();
        store.fail_reads_for("bad.m4a");
        store.fail_writes_for("bad.m4a");

        assert!(store.read(Path::new("bad.m4a")).is_err());
        assert!(
            store
                .write(
                    Path::new("bad.m4a"),
                    &[(FieldName::Title, FieldWrite::Delete)]
                )
                .is_err()
        );
        assert!(store.write_log.is_empty());

        store.heal_writes_for(Path::new("bad.m4a"));
        assert!(
            store
                .write(
                    Path::new("bad.m4a"),
                    &[(FieldName::Title, FieldWrite::Delete)]
                )
                .is_ok()
        );
        assert_eq!(store.write_log.len(), 1);
    }
}
