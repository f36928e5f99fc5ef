//! Errors raised by the recommender.

use sillage_core::{FragranceId, SourceError};
use thiserror::Error;

/// Errors raised while producing recommendations or profile summaries.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The person has not rated enough fragrances to build a useful profile.
    #[error("at least {required} evaluations are needed for recommendations (found {found})")]
    InsufficientData {
        /// Minimum number of rating events.
        required: usize,
        /// Rating events actually recorded.
        found: usize,
    },
    /// The requested result count was outside the accepted range.
    #[error("limit must lie within {min}..={max} (got {limit})")]
    InvalidLimit {
        /// Requested limit.
        limit: usize,
        /// Smallest accepted limit.
        min: usize,
        /// Largest accepted limit.
        max: usize,
    },
    /// The fragrance to match is not in the catalogue.
    #[error("fragrance {0} is not in the catalogue")]
    UnknownFragrance(FragranceId),
    /// A collaborator source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl RecommendError {
    /// Report whether the error is the insufficient-history condition.
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
