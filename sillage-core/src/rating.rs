//! Star ratings and the events that feed preference profiles.

use thiserror::Error;

use crate::Fragrance;

/// A validated star rating in the inclusive range `1..=5`.
///
/// Out-of-range values are rejected rather than clamped so a corrupt
/// history never skews a profile unnoticed.
///
/// # Examples
/// ```
/// use sillage_core::Rating;
///
/// # fn main() -> Result<(), sillage_core::RatingError> {
/// let rating = Rating::new(5)?;
/// assert_eq!(rating.stars(), 5);
/// assert_eq!(rating.weight(3), 2.0);
/// assert!(Rating::new(0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "u8")
)]
pub struct Rating(u8);

/// Errors returned when constructing a [`Rating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatingError {
    /// The star value fell outside `1..=5`.
    #[error("rating {0} is outside the 1..=5 star range")]
    OutOfRange(i64),
}

impl Rating {
    /// Lowest accepted star value.
    pub const MIN: u8 = 1;
    /// Highest accepted star value.
    pub const MAX: u8 = 5;

    /// Validate and wrap a star value.
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] when `stars` is not in `1..=5`.
    pub fn new(stars: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(RatingError::OutOfRange(i64::from(stars)))
        }
    }

    /// Return the raw star value.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Signed contribution of this rating relative to a neutral `centre`.
    ///
    /// With the default centre of `3`, stars `1..=5` map to `-2..=2`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "rating weights are signed floating-point offsets"
    )]
    pub fn weight(self, centre: u8) -> f64 {
        f64::from(self.0) - f64::from(centre)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| RatingError::OutOfRange(value))
            .and_then(Self::new)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// One person's rating of one fragrance.
///
/// The fragrance is fully resolved so the profile builder can read its tags
/// without further lookups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RatingEvent {
    /// The rated fragrance.
    pub fragrance: Fragrance,
    /// The star value given.
    pub rating: Rating,
}

impl RatingEvent {
    /// Pair a fragrance with a rating.
    #[must_use]
    pub const fn new(fragrance: Fragrance, rating: Rating) -> Self {
        Self { fragrance, rating }
    }
}
