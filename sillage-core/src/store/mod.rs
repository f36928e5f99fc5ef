//! Read-only collaborator interfaces consumed by the recommendation core.
//!
//! The core never owns persistence. It reads rating histories, fragrance
//! tag data and candidate sets through these traits. A test catalogue lives
//! in [`crate::test_support`] and a SQLite-backed implementation is
//! available behind the `store-sqlite` feature.

use thiserror::Error;

use crate::{Fragrance, FragranceId, RatingEvent, ReviewerId};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCatalogue, SqliteCatalogueError};

#[cfg(all(feature = "store-sqlite", any(test, feature = "test-support")))]
pub(crate) use sqlite::SCHEMA_SQL;

/// Boxed error raised by a storage backend.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by collaborator sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A rating referenced a fragrance the catalogue does not hold.
    #[error("rating references unknown fragrance {0}")]
    MissingFragrance(FragranceId),
    /// The underlying store failed.
    #[error("failed to {operation}")]
    Backend {
        /// Description of the failed operation.
        operation: &'static str,
        /// Error reported by the backend.
        #[source]
        source: BackendError,
    },
}

/// Which fragrances count as candidates for a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CandidatePolicy {
    /// Every fragrance the person has not rated yet.
    #[default]
    ExcludeRated,
    /// Every fragrance in the catalogue.
    IncludeRated,
}

/// Source of a person's rating history.
///
/// Ordering of the returned events carries no meaning. A person without any
/// ratings yields an empty list rather than an error.
pub trait RatingSource {
    /// Return every rating event recorded for `reviewer`, with the rated
    /// fragrance fully resolved.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the backend fails or a rating points at a
    /// fragrance that cannot be resolved.
    fn ratings_for(&self, reviewer: &ReviewerId) -> Result<Vec<RatingEvent>, SourceError>;
}

/// Source of fragrance tag data.
pub trait FragranceSource {
    /// Look up a single fragrance.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the backend fails.
    fn fragrance(&self, id: &FragranceId) -> Result<Option<Fragrance>, SourceError>;
}

/// Source of the fragrances eligible for scoring.
pub trait CandidateSource {
    /// Return the candidate set for `reviewer` under `policy`.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the backend fails.
    fn candidates_for(
        &self,
        reviewer: &ReviewerId,
        policy: CandidatePolicy,
    ) -> Result<Vec<Fragrance>, SourceError>;
}
