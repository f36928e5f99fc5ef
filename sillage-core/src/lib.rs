//! Core domain types for the Sillage fragrance recommender.
//!
//! The crate models fragrances, their note and accord tags, the ratings a
//! person gives them and the preference profile learned from those
//! ratings. It also defines the [`Matcher`] seam and the read-only source
//! traits the scoring crate consumes. Constructors validate their input and
//! return `Result` so invalid tag data is rejected at the boundary.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod accord;
pub mod family;
pub mod fragrance;
pub mod ids;
pub mod matching;
pub mod note;
pub mod profile;
pub mod rating;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(all(docsrs, not(test)), doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use accord::{Intensity, IntensityError};
pub use family::{ClassKey, ClassificationParseError, Family, Subfamily};
pub use fragrance::{Fragrance, FragranceBuilder, FragranceError};
pub use ids::{AccordId, FragranceId, NoteId, ReviewerId};
pub use matching::{MatchComponents, MatchResult, Matcher, Veto};
pub use note::{FragranceNote, Note, NotePosition, NotePositionParseError};
pub use profile::PreferenceProfile;
pub use rating::{Rating, RatingError, RatingEvent};
pub use store::{
    BackendError, CandidatePolicy, CandidateSource, FragranceSource, RatingSource, SourceError,
};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteCatalogue, SqliteCatalogueError};
