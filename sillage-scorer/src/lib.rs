//! Preference profiles and match scoring for Sillage.
//!
//! The crate turns a person's star ratings into a signed-affinity
//! [`PreferenceProfile`](sillage_core::PreferenceProfile) and scores
//! candidate fragrances against it:
//! - [`build_profile`] folds a rating history into note, accord and
//!   classification affinities centred on three stars.
//! - [`AffinityMatcher`] implements [`Matcher`](sillage_core::Matcher),
//!   combining mean note and accord affinities with family and subfamily
//!   affinity, squashing the result through a logistic curve and vetoing
//!   fragrances that contain a strongly disliked note.
//! - [`rank`] orders scored fragrances with vetoed entries last.
//! - [`Recommender`] ties the above to a catalogue and enforces the
//!   minimum-history and result-limit rules.
//!
//! # Examples
//!
//! ```
//! use sillage_core::{Matcher, NoteId, Rating, RatingEvent, test_support::fragrance_with_notes};
//! use sillage_scorer::{AffinityMatcher, ScoringConfig, build_profile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let history = [
//!     RatingEvent::new(fragrance_with_notes("a", &["bergamot"]), Rating::new(5)?),
//!     RatingEvent::new(fragrance_with_notes("b", &["lemon"]), Rating::new(1)?),
//! ];
//! let profile = build_profile(&history, &ScoringConfig::default());
//! assert_eq!(profile.note_affinity(&NoteId::from("lemon")), -2.0);
//!
//! let result = AffinityMatcher::default().score(&profile, &fragrance_with_notes("c", &["bergamot"]));
//! assert!(result.score > 0.5);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod config;
mod error;
mod matcher;
mod ranking;
mod recommender;
mod summary;

pub use builder::build_profile;
pub use config::{ComponentWeights, ScoringConfig, ScoringConfigError, WEIGHT_SUM_TOLERANCE};
pub use error::RecommendError;
pub use matcher::AffinityMatcher;
pub use ranking::{RankedFragrance, rank, sort_ranked};
pub use recommender::{
    DEFAULT_LIMIT, DEFAULT_MIN_EVALUATIONS, MAX_LIMIT, MIN_LIMIT, RecommendOptions,
    Recommendation, Recommender,
};
pub use summary::{AccordAffinity, ClassAffinity, NoteAffinity, ProfileSummary, SUMMARY_LENGTH};
