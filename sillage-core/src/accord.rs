//! Accord intensities.
//!
//! Accords describe how a fragrance is perceived (citrus, powdery, smoky)
//! and carry an intensity weight instead of binary presence.

use thiserror::Error;

/// Intensity of an accord on a fragrance, in the inclusive range `[0.0, 1.0]`.
///
/// # Examples
/// ```
/// use sillage_core::Intensity;
///
/// # fn main() -> Result<(), sillage_core::IntensityError> {
/// let intensity = Intensity::new(0.75)?;
/// assert_eq!(intensity.get(), 0.75);
/// assert!(Intensity::new(1.5).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Intensity(f64);

/// Errors returned by [`Intensity::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IntensityError {
    /// The value was NaN or infinite.
    #[error("accord intensity must be finite")]
    NotFinite,
    /// The value fell outside `[0.0, 1.0]`.
    #[error("accord intensity {0} is outside 0.0..=1.0")]
    OutOfRange(f64),
}

impl Intensity {
    /// Full intensity.
    pub const FULL: Self = Self(1.0);

    /// Validate and wrap an intensity value.
    ///
    /// # Errors
    /// Returns [`IntensityError`] when `value` is not finite or lies outside
    /// `[0.0, 1.0]`.
    pub fn new(value: f64) -> Result<Self, IntensityError> {
        if !value.is_finite() {
            return Err(IntensityError::NotFinite);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(IntensityError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Return the raw intensity.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Intensity {
    type Error = IntensityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Intensity> for f64 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}
