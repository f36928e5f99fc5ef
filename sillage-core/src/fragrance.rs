//! Fragrances: the items people rate and receive recommendations for.
//!
//! Construction goes through [`FragranceBuilder`], which validates the
//! classification pair, accord intensities and note uniqueness so scoring
//! code can assume well-formed tag data.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    AccordId, Family, FragranceId, FragranceNote, Intensity, IntensityError, Note, NotePosition,
    Subfamily,
};

/// An immutable, fully resolved fragrance.
///
/// # Examples
/// ```
/// use sillage_core::{Family, Fragrance, Note, NotePosition, Subfamily};
///
/// # fn main() -> Result<(), sillage_core::FragranceError> {
/// let fragrance = Fragrance::builder("f-1", Family::Fresh, Subfamily::Citrus)
///     .name("Aqua Citrus")
///     .brand("Maison")
///     .note(Note::new("bergamot", "Bergamot"), NotePosition::Top)
///     .accord("citrus", 0.9)
///     .build()?;
/// assert_eq!(fragrance.notes().len(), 1);
/// assert_eq!(fragrance.accords().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fragrance {
    /// Catalogue identity.
    pub id: FragranceId,
    /// Display name.
    pub name: String,
    /// Brand or house.
    pub brand: String,
    /// Primary family.
    pub family: Family,
    /// Subfamily; always belongs to `family`.
    pub subfamily: Subfamily,
    pub(crate) notes: Vec<FragranceNote>,
    pub(crate) accords: BTreeMap<AccordId, Intensity>,
}

/// Errors returned by [`FragranceBuilder::build`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FragranceError {
    /// The subfamily belongs to a different family.
    #[error("subfamily {subfamily} belongs to {expected}, not {family}")]
    SubfamilyMismatch {
        /// Family supplied for the fragrance.
        family: Family,
        /// Subfamily supplied for the fragrance.
        subfamily: Subfamily,
        /// Family that owns the subfamily.
        expected: Family,
    },
    /// A note was listed more than once.
    #[error("note {0} appears more than once")]
    DuplicateNote(String),
    /// An accord was listed more than once.
    #[error("accord {0} appears more than once")]
    DuplicateAccord(String),
    /// An accord intensity was unusable.
    #[error("accord {accord} has an invalid intensity")]
    InvalidIntensity {
        /// Accord carrying the bad value.
        accord: String,
        /// Validation failure.
        #[source]
        source: IntensityError,
    },
}

impl Fragrance {
    /// Start building a fragrance with its identity and classification.
    pub fn builder(
        id: impl Into<FragranceId>,
        family: Family,
        subfamily: Subfamily,
    ) -> FragranceBuilder {
        FragranceBuilder {
            id: id.into(),
            name: String::new(),
            brand: String::new(),
            family,
            subfamily,
            notes: Vec::new(),
            accords: Vec::new(),
        }
    }

    /// Notes in listing order.
    #[must_use]
    pub fn notes(&self) -> &[FragranceNote] {
        &self.notes
    }

    /// Accord intensities keyed by accord.
    #[must_use]
    pub const fn accords(&self) -> &BTreeMap<AccordId, Intensity> {
        &self.accords
    }

    /// Iterate over the bare notes, ignoring pyramid position.
    pub fn iter_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().map(|placed| &placed.note)
    }
}

/// Incremental constructor for [`Fragrance`].
#[derive(Debug, Clone)]
pub struct FragranceBuilder {
    id: FragranceId,
    name: String,
    brand: String,
    family: Family,
    subfamily: Subfamily,
    notes: Vec<FragranceNote>,
    accords: Vec<(AccordId, f64)>,
}

impl FragranceBuilder {
    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the brand.
    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Add a note at a pyramid position.
    #[must_use]
    pub fn note(mut self, note: Note, position: NotePosition) -> Self {
        self.notes.push(FragranceNote::new(note, position));
        self
    }

    /// Add an accord with a raw intensity, validated on [`build`](Self::build).
    #[must_use]
    pub fn accord(mut self, accord: impl Into<AccordId>, intensity: f64) -> Self {
        self.accords.push((accord.into(), intensity));
        self
    }

    /// Validate and produce the fragrance.
    ///
    /// # Errors
    /// Returns [`FragranceError`] when the subfamily does not belong to the
    /// family, a note or accord repeats, or an intensity is out of range.
    pub fn build(self) -> Result<Fragrance, FragranceError> {
        let expected = self.subfamily.family();
        if expected != self.family {
            return Err(FragranceError::SubfamilyMismatch {
                family: self.family,
                subfamily: self.subfamily,
                expected,
            });
        }

        for (index, placed) in self.notes.iter().enumerate() {
            let repeated = self
                .notes
                .iter()
                .skip(index + 1)
                .any(|other| other.note.id == placed.note.id);
            if repeated {
                return Err(FragranceError::DuplicateNote(placed.note.id.to_string()));
            }
        }

        let mut accords = BTreeMap::new();
        for (accord, raw) in self.accords {
            let intensity =
                Intensity::new(raw).map_err(|source| FragranceError::InvalidIntensity {
                    accord: accord.to_string(),
                    source,
                })?;
            if accords.contains_key(&accord) {
                return Err(FragranceError::DuplicateAccord(accord.to_string()));
            }
            accords.insert(accord, intensity);
        }

        Ok(Fragrance {
            id: self.id,
            name: self.name,
            brand: self.brand,
            family: self.family,
            subfamily: self.subfamily,
            notes: self.notes,
            accords,
        })
    }
}
