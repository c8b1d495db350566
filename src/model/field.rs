use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of editable tag fields.
///
/// Declaration order is significant: it is the display order of the field
/// pane and the vertical navigation order, via [`FieldName::ALL`]. The
/// derived `Ord` follows the same order, so a [`TagSet`] iterates fields
/// the way the screen shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Year,
    Track,
    Genre,
}

impl FieldName {
    /// All fields, in display order.
    pub const ALL: [FieldName; 7] = [
        FieldName::Title,
        FieldName::Artist,
        FieldName::Album,
        FieldName::AlbumArtist,
        FieldName::Year,
        FieldName::Track,
        FieldName::Genre,
    ];

    /// The label shown in the field pane.
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Title => "Title",
            FieldName::Artist => "Artist",
            FieldName::Album => "Album",
            FieldName::AlbumArtist => "Album Artist",
            FieldName::Year => "Year",
            FieldName::Track => "Track",
            FieldName::Genre => "Genre",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A partial mapping from field to value. Not required to contain every
/// field; iteration order is field order.
pub type TagSet = BTreeMap<FieldName, String>;

/// A single field mutation handed to the metadata store.
///
/// Staged values use the empty string to mean "delete on save"; this enum
/// makes that overload explicit at the store boundary so it cannot be
/// confused with the batch template's "empty means leave unedited" rule
/// (which never produces a `Delete`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWrite {
    Set(String),
    Delete,
}

impl FieldWrite {
    /// Convert a staged value into its save-time meaning.
    pub fn from_staged(value: &str) -> FieldWrite {
        if value.is_empty() {
            FieldWrite::Delete
        } else {
            FieldWrite::Set(value.to_string())
        }
    }
}
