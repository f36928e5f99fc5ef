//! Notes: ingredient-level descriptors present on a fragrance.
//!
//! A note's presence is binary. The pyramid position is carried through for
//! callers but plays no part in scoring.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::NoteId;

/// A single ingredient note with a human-readable name.
///
/// # Examples
/// ```
/// use sillage_core::Note;
///
/// let note = Note::new("bergamot", "Bergamot");
/// assert_eq!(note.id.as_str(), "bergamot");
/// assert_eq!(note.name, "Bergamot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Stable identity of the note.
    pub id: NoteId,
    /// Display name used in veto reasons and summaries.
    pub name: String,
}

impl Note {
    /// Construct a note from its identifier and display name.
    pub fn new(id: impl Into<NoteId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Where a note sits in the fragrance pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum NotePosition {
    /// Opening notes.
    Top,
    /// Middle notes.
    #[default]
    Heart,
    /// Dry-down notes.
    Base,
}

impl NotePosition {
    /// Return the position as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Heart => "heart",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for NotePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a pyramid position is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown note position '{0}'")]
pub struct NotePositionParseError(pub String);

impl FromStr for NotePosition {
    type Err = NotePositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "heart" | "middle" => Ok(Self::Heart),
            "base" => Ok(Self::Base),
            _ => Err(NotePositionParseError(s.to_owned())),
        }
    }
}

/// A note placed on a fragrance at a pyramid position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FragranceNote {
    /// The note itself.
    pub note: Note,
    /// Position within the pyramid.
    pub position: NotePosition,
}

impl FragranceNote {
    /// Place `note` at `position`.
    #[must_use]
    pub const fn new(note: Note, position: NotePosition) -> Self {
        Self { note, position }
    }
}
