use std::fs;
use std::path::{Path, PathBuf};

/// Extensions of containers the store can read and write.
pub const AUDIO_EXTENSIONS: &[&str] = &["m4a", "mp4", "mp3", "flac", "ogg", "opus", "wav"];

/// Error type for library enumeration
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("could not list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// List the editable audio files of one directory, sorted by file name.
///
/// Non-recursive: the editor operates on a flat directory listing, built
/// once at startup and immutable for the session.
pub fn list_audio_files(dir: &Path) -> Result<Vec<PathBuf>, LibraryError> {
    let entries = fs::read_dir(dir).map_err(|e| LibraryError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        if let Some(ext) = ext
            && AUDIO_EXTENSIONS.contains(&ext.as_str())
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
