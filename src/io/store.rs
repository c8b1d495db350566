use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::tag::{ItemKey, Tag};

use crate::model::{FieldName, FieldWrite, TagSet};

/// Error type for metadata store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read tags from {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("could not write tags to {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// The metadata store seam.
///
/// `read` returns a partial [`TagSet`] — fields the container does not
/// carry are simply absent. Callers must treat a read failure as an empty
/// tag set, never as fatal: a file with an unreadable container stays
/// navigable and editable.
///
/// `write` applies per-field mutations; fields not listed are left
/// untouched in the container.
pub trait TagStore {
    fn read(&self, path: &Path) -> Result<TagSet, StoreError>;
    fn write(&mut self, path: &Path, writes: &[(FieldName, FieldWrite)]) -> Result<(), StoreError>;
}

/// Parse a track value of the form `"N"` or `"N/M"`.
///
/// Returns `(number, total)`; a missing or zero total is `None`. Anything
/// that does not parse yields `None` — the caller silently ignores the
/// field, matching how players treat junk track atoms.
pub fn parse_track_value(value: &str) -> Option<(u32, Option<u32>)> {
    let value = value.trim();
    match value.split_once('/') {
        Some((n, m)) => {
            let n = n.trim().parse::<u32>().ok()?;
            let m = m.trim().parse::<u32>().ok()?;
            Some((n, if m > 0 { Some(m) } else { None }))
        }
        None => Some((value.parse::<u32>().ok()?, None)),
    }
}

/// Render a track number (and optional total) the way the field pane and
/// the store exchange it: `"N/M"` when a positive total exists, else `"N"`.
pub fn format_track_value(number: u32, total: Option<u32>) -> String {
    match total {
        Some(m) if m > 0 => format!("{}/{}", number, m),
        _ => number.to_string(),
    }
}

/// Tag store backed by real audio containers via lofty.
///
/// One abstraction covers the formats the library lists: MP4 ilst atoms,
/// ID3v2, Vorbis comments, and RIFF INFO.
#[derive(Debug, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        FileStore
    }

    /// Load the primary tag of a file, or a fresh tag of the container's
    /// preferred type when the file carries none yet.
    fn load_tag(&self, path: &Path) -> Result<Tag, StoreError> {
        let tagged = lofty::read_from_path(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(tagged
            .primary_tag()
            .or_else(|| tagged.first_tag())
            .cloned()
            .unwrap_or_else(|| Tag::new(tagged.primary_tag_type())))
    }
}

impl TagStore for FileStore {
    fn read(&self, path: &Path) -> Result<TagSet, StoreError> {
        let tag = self.load_tag(path)?;
        let mut tags = TagSet::new();

        if let Some(v) = tag.title() {
            tags.insert(FieldName::Title, v.to_string());
        }
        if let Some(v) = tag.artist() {
            tags.insert(FieldName::Artist, v.to_string());
        }
        if let Some(v) = tag.album() {
            tags.insert(FieldName::Album, v.to_string());
        }
        if let Some(v) = tag.get_string(&ItemKey::AlbumArtist) {
            tags.insert(FieldName::AlbumArtist, v.to_string());
        }
        // The MP4 date atom is free text (often a full date), so Year is
        // exchanged as a string rather than a number.
        if let Some(v) = tag.get_string(&ItemKey::RecordingDate) {
            tags.insert(FieldName::Year, v.to_string());
        }
        if let Some(n) = tag.track() {
            let total = tag.track_total().filter(|m| *m > 0);
            tags.insert(FieldName::Track, format_track_value(n, total));
        }
        if let Some(v) = tag.genre() {
            tags.insert(FieldName::Genre, v.to_string());
        }

        Ok(tags)
    }

    fn write(&mut self, path: &Path, writes: &[(FieldName, FieldWrite)]) -> Result<(), StoreError> {
        let mut tag = self.load_tag(path)?;

        for (field, write) in writes {
            match write {
                FieldWrite::Set(value) => match field {
                    FieldName::Title => tag.set_title(value.clone()),
                    FieldName::Artist => tag.set_artist(value.clone()),
                    FieldName::Album => tag.set_album(value.clone()),
                    FieldName::AlbumArtist => {
                        tag.insert_text(ItemKey::AlbumArtist, value.clone());
                    }
                    FieldName::Year => {
                        tag.insert_text(ItemKey::RecordingDate, value.clone());
                    }
                    FieldName::Track => {
                        // Non-parseable input is silently ignored for this
                        // field only; other staged fields still apply.
                        if let Some((n, total)) = parse_track_value(value) {
                            tag.set_track(n);
                            match total {
                                Some(m) => tag.set_track_total(m),
                                None => tag.remove_track_total(),
                            }
                        }
                    }
                    FieldName::Genre => tag.set_genre(value.clone()),
                },
                FieldWrite::Delete => match field {
                    FieldName::Title => tag.remove_title(),
                    FieldName::Artist => tag.remove_artist(),
                    FieldName::Album => tag.remove_album(),
                    FieldName::AlbumArtist => {
                        let _ = tag.remove_key(&ItemKey::AlbumArtist);
                    }
                    FieldName::Year => {
                        let _ = tag.remove_key(&ItemKey::RecordingDate);
                    }
                    FieldName::Track => {
                        tag.remove_track();
                        tag.remove_track_total();
                    }
                    FieldName::Genre => tag.remove_genre(),
                },
            }
        }

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| StoreError::Write {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}
