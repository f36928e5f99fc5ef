//! Immutable tuning knobs shared by the profile builder and the matcher.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sillage_core::Rating;

/// Sums further than this from `1.0` are rejected.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative weight of each match component in the raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    /// Weight of the mean note affinity.
    pub notes: f64,
    /// Weight of the mean intensity-scaled accord affinity.
    pub accords: f64,
    /// Weight of the primary family affinity.
    pub family: f64,
    /// Weight of the subfamily affinity.
    pub subfamily: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            notes: 0.40,
            accords: 0.30,
            family: 0.20,
            subfamily: 0.10,
        }
    }
}

impl ComponentWeights {
    fn named(self) -> [(&'static str, f64); 4] {
        [
            ("notes", self.notes),
            ("accords", self.accords),
            ("family", self.family),
            ("subfamily", self.subfamily),
        ]
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums the component weights"
    )]
    fn sum(self) -> f64 {
        self.notes + self.accords + self.family + self.subfamily
    }
}

/// Scoring configuration.
///
/// Defaults reproduce the reference tuning: weights `0.40/0.30/0.20/0.10`,
/// a veto below `-3.0` affinity scoring `0.1`, ratings centred on three
/// stars and half credit for the subfamily.
///
/// # Examples
/// ```
/// use sillage_scorer::ScoringConfig;
///
/// let config = ScoringConfig::default().validate().expect("defaults are valid");
/// assert_eq!(config.rating_centre, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Component weights; must sum to `1.0`.
    pub weights: ComponentWeights,
    /// A note whose affinity is strictly below this vetoes the fragrance.
    pub veto_threshold: f64,
    /// Score reported for vetoed fragrances.
    pub vetoed_score: f64,
    /// Star value that contributes zero weight.
    pub rating_centre: u8,
    /// Fraction of a rating's weight credited to the subfamily.
    pub subfamily_credit: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            veto_threshold: -3.0,
            vetoed_score: 0.1,
            rating_centre: 3,
            subfamily_credit: 0.5,
        }
    }
}

/// Errors returned by [`ScoringConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringConfigError {
    /// A weight was NaN or infinite.
    #[error("{component} weight must be finite")]
    NonFiniteWeight {
        /// Component carrying the bad weight.
        component: &'static str,
    },
    /// A weight was negative.
    #[error("{component} weight must not be negative (got {value})")]
    NegativeWeight {
        /// Component carrying the bad weight.
        component: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The weights did not add up to one.
    #[error("component weights must sum to 1.0 (got {sum})")]
    WeightSum {
        /// Actual total.
        sum: f64,
    },
    /// The veto threshold was NaN or infinite.
    #[error("veto threshold must be finite")]
    NonFiniteThreshold,
    /// The vetoed score fell outside `[0, 1]`.
    #[error("vetoed score must lie within [0, 1] (got {0})")]
    VetoedScoreOutOfRange(f64),
    /// The rating centre was not a valid star value.
    #[error("rating centre must lie within 1..=5 (got {0})")]
    RatingCentreOutOfRange(u8),
    /// The subfamily credit was NaN or infinite.
    #[error("subfamily credit must be finite")]
    NonFiniteSubfamilyCredit,
}

impl ScoringConfig {
    /// Validate the configuration and return it unchanged.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] naming the first rule the
    /// configuration breaks.
    #[expect(
        clippy::float_arithmetic,
        reason = "validation compares the weight total against one"
    )]
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        for (component, value) in self.weights.named() {
            if !value.is_finite() {
                return Err(ScoringConfigError::NonFiniteWeight { component });
            }
            if value < 0.0 {
                return Err(ScoringConfigError::NegativeWeight { component, value });
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringConfigError::WeightSum { sum });
        }
        if !self.veto_threshold.is_finite() {
            return Err(ScoringConfigError::NonFiniteThreshold);
        }
        if !(0.0..=1.0).contains(&self.vetoed_score) {
            return Err(ScoringConfigError::VetoedScoreOutOfRange(self.vetoed_score));
        }
        if Rating::new(self.rating_centre).is_err() {
            return Err(ScoringConfigError::RatingCentreOutOfRange(
                self.rating_centre,
            ));
        }
        if !self.subfamily_credit.is_finite() {
            return Err(ScoringConfigError::NonFiniteSubfamilyCredit);
        }
        Ok(self)
    }
}
