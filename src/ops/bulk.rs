use std::path::PathBuf;

use crate::io::store::TagStore;
use crate::model::FieldName;
use crate::ops::cache::EditCache;

/// Result of reviewing an external-editor round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkReview {
    /// The edited text is identical to what was handed out.
    Unchanged,
    /// Correspondence invariant violated: not exactly one line per file.
    CountMismatch { expected: usize, actual: usize },
    /// One new value per marked file, in file-list order.
    Changed(Vec<String>),
}

/// Compose the text handed to the external editor: one line per file, in
/// the given (file-list) order, holding the file's effective value for
/// `field`. Newlines inside values would break line correspondence, so
/// they are flattened to spaces.
pub fn compose_lines(
    store: &dyn TagStore,
    cache: &EditCache,
    field: FieldName,
    files: &[PathBuf],
) -> String {
    let mut out = String::new();
    for file in files {
        let tags = cache.effective_tags(store, file);
        let value = tags.get(&field).map(String::as_str).unwrap_or("");
        out.push_str(&value.replace(['\n', '\r'], " "));
        out.push('\n');
    }
    out
}

/// Review the edited text against the original.
///
/// Line count must equal the number of marked files, or the whole bulk
/// edit is off; unchanged content also cancels. Only a changed,
/// count-matching result carries values to stage.
pub fn review(original: &str, edited: &str, expected: usize) -> BulkReview {
    let edited_lines: Vec<&str> = lines_of(edited);
    if edited_lines.len() != expected {
        return BulkReview::CountMismatch {
            expected,
            actual: edited_lines.len(),
        };
    }
    if lines_of(original) == edited_lines {
        return BulkReview::Unchanged;
    }
    BulkReview::Changed(edited_lines.into_iter().map(str::to_string).collect())
}

/// Stage line i into file i's cache entry for `field`. This bulk set is
/// authoritative: it overwrites, never merges.
pub fn apply(cache: &mut EditCache, field: FieldName, files: &[PathBuf], values: &[String]) {
    for (file, value) in files.iter().zip(values) {
        cache.stage(file, field, value.clone());
    }
}

/// Split into lines, tolerating one trailing newline and CRLF endings
/// (editors differ on both). The empty check comes before the newline
/// strip: `"\n"` is one empty line (a single cleared value), only `""`
/// is zero lines.
fn lines_of(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}
