//! Facade crate for the Sillage fragrance recommender.
//!
//! This crate re-exports the core domain types and exposes the scoring
//! engine and SQLite catalogue behind feature flags.

#![forbid(unsafe_code)]

pub use sillage_core::{
    AccordId, CandidatePolicy, CandidateSource, ClassKey, Family, Fragrance, FragranceId,
    FragranceSource, MatchComponents, MatchResult, Matcher, Note, NoteId, NotePosition,
    PreferenceProfile, Rating, RatingEvent, RatingSource, ReviewerId, SourceError, Subfamily, Veto,
};

#[cfg(feature = "store-sqlite")]
pub use sillage_core::{SqliteCatalogue, SqliteCatalogueError};

#[cfg(feature = "scorer")]
pub use sillage_scorer::{
    AffinityMatcher, ProfileSummary, RecommendError, RecommendOptions, Recommendation,
    Recommender, ScoringConfig, build_profile,
};
