//! Match results and the `Matcher` trait.
//!
//! A [`Matcher`] predicts how well a [`Fragrance`] fits a
//! [`PreferenceProfile`], returning a bounded score together with the
//! component values that produced it.

use std::cmp::Ordering;

use crate::{Fragrance, NoteId, PreferenceProfile};

/// Pre-weight component values behind a match score.
///
/// Values are raw and may be negative. They exist so callers can explain a
/// recommendation; the weighted combination lives in the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchComponents {
    /// Mean note affinity over the fragrance's notes.
    pub notes: f64,
    /// Mean intensity-weighted accord affinity.
    pub accords: f64,
    /// Affinity for the primary family.
    pub family: f64,
    /// Affinity for the subfamily.
    pub subfamily: f64,
    /// Weighted sum before the logistic transform.
    pub raw: f64,
}

/// The note that disqualified a fragrance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Veto {
    /// Identity of the disliked note.
    pub note: NoteId,
    /// Display name of the disliked note.
    pub name: String,
}

/// Outcome of scoring one fragrance against one profile.
///
/// # Examples
/// ```
/// use sillage_core::{MatchComponents, MatchResult};
///
/// let result = MatchResult::scored(0.5, MatchComponents::default());
/// assert!(!result.is_vetoed());
/// assert_eq!(result.score_percent, 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    /// Bounded match score in `[0.0, 1.0]`.
    pub score: f64,
    /// `score` as a whole percentage, rounded down.
    pub score_percent: u8,
    /// Set when a strongly disliked note overrode the score.
    pub veto: Option<Veto>,
    /// Component values; all zero when vetoed.
    pub components: MatchComponents,
}

impl MatchResult {
    /// Build a non-vetoed result.
    #[must_use]
    pub fn scored(score: f64, components: MatchComponents) -> Self {
        Self {
            score,
            score_percent: percent(score),
            veto: None,
            components,
        }
    }

    /// Build a vetoed result carrying the fixed vetoed score.
    #[must_use]
    pub fn vetoed(score: f64, veto: Veto) -> Self {
        Self {
            score,
            score_percent: percent(score),
            veto: Some(veto),
            components: MatchComponents::default(),
        }
    }

    /// Report whether a veto applied.
    #[must_use]
    pub const fn is_vetoed(&self) -> bool {
        self.veto.is_some()
    }

    /// Ranking order: non-vetoed before vetoed, then score descending.
    ///
    /// Returns [`Ordering::Less`] when `self` should be listed first.
    #[must_use]
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        self.is_vetoed()
            .cmp(&other.is_vetoed())
            .then_with(|| other.score.total_cmp(&self.score))
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "percentages are floored and saturate into 0..=100"
)]
fn percent(score: f64) -> u8 {
    let scaled = (score * 100.0).floor().clamp(0.0, 100.0);
    scaled as u8
}

/// Predict how well a fragrance fits a preference profile.
///
/// Implementations must be pure: the same profile and fragrance always
/// produce the same result. They must be `Send + Sync` so one matcher can
/// score many candidates across threads.
///
/// # Examples
///
/// ```rust
/// use sillage_core::{Fragrance, MatchComponents, MatchResult, Matcher, PreferenceProfile};
///
/// struct Indifferent;
///
/// impl Matcher for Indifferent {
///     fn score(&self, _profile: &PreferenceProfile, _fragrance: &Fragrance) -> MatchResult {
///         MatchResult::scored(0.5, MatchComponents::default())
///     }
/// }
///
/// # fn main() -> Result<(), sillage_core::FragranceError> {
/// let fragrance = Fragrance::builder(
///     "f-1",
///     sillage_core::Family::Woody,
///     sillage_core::Subfamily::Woods,
/// )
/// .build()?;
/// let result = Indifferent.score(&PreferenceProfile::new(), &fragrance);
/// assert_eq!(result.score, 0.5);
/// # Ok(())
/// # }
/// ```
pub trait Matcher: Send + Sync {
    /// Score `fragrance` against `profile`.
    fn score(&self, profile: &PreferenceProfile, fragrance: &Fragrance) -> MatchResult;
}
