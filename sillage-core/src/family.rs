//! Two-level fragrance classification based on the Michael Edwards wheel.
//!
//! Every [`Subfamily`] belongs to exactly one [`Family`]. Both enums offer
//! compile-time safety for profile lookups and round-trip through their
//! lowercase string form.
//!
//! # Examples
//! ```
//! use sillage_core::{Family, Subfamily};
//!
//! assert_eq!(Family::Woody.as_str(), "woody");
//! assert_eq!(Subfamily::MossyWoods.family(), Family::Woody);
//! assert_eq!("Soft Floral".parse::<Subfamily>(), Ok(Subfamily::SoftFloral));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Primary fragrance family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Family {
    /// Citrus, green, aquatic and aromatic scents.
    Fresh,
    /// Flower-led compositions.
    Floral,
    /// Resinous, warm and spicy scents (formerly "oriental").
    Amber,
    /// Wood-led compositions.
    Woody,
}

impl Family {
    /// Every family in wheel order.
    pub const ALL: [Self; 4] = [Self::Fresh, Self::Floral, Self::Amber, Self::Woody];

    /// Return the family as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Floral => "floral",
            Self::Amber => "amber",
            Self::Woody => "woody",
        }
    }
}

/// Secondary classification nested under a [`Family`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Subfamily {
    /// Lavender, herbs and fougère accords.
    Aromatic,
    /// Bergamot, lemon and other hesperidic notes.
    Citrus,
    /// Marine and aquatic notes.
    Water,
    /// Leafy, cut-grass notes.
    Green,
    /// Non-citrus fruit.
    Fruity,
    /// Bright floral bouquets.
    Floral,
    /// Powdery, aldehydic florals.
    SoftFloral,
    /// Florals with a warm amber base.
    FloralAmber,
    /// Incense and soft resins.
    SoftAmber,
    /// Rich vanilla and resin compositions.
    Amber,
    /// Sandalwood and agarwood over amber.
    WoodyAmber,
    /// Aromatic and dry woods.
    Woods,
    /// Chypre compositions built on oakmoss.
    MossyWoods,
    /// Leather and smoky woods.
    DryWoods,
}

impl Subfamily {
    /// Every subfamily in wheel order.
    pub const ALL: [Self; 14] = [
        Self::Aromatic,
        Self::Citrus,
        Self::Water,
        Self::Green,
        Self::Fruity,
        Self::Floral,
        Self::SoftFloral,
        Self::FloralAmber,
        Self::SoftAmber,
        Self::Amber,
        Self::WoodyAmber,
        Self::Woods,
        Self::MossyWoods,
        Self::DryWoods,
    ];

    /// Return the subfamily as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aromatic => "aromatic",
            Self::Citrus => "citrus",
            Self::Water => "water",
            Self::Green => "green",
            Self::Fruity => "fruity",
            Self::Floral => "floral",
            Self::SoftFloral => "soft_floral",
            Self::FloralAmber => "floral_amber",
            Self::SoftAmber => "soft_amber",
            Self::Amber => "amber",
            Self::WoodyAmber => "woody_amber",
            Self::Woods => "woods",
            Self::MossyWoods => "mossy_woods",
            Self::DryWoods => "dry_woods",
        }
    }

    /// Return the family this subfamily belongs to.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Aromatic | Self::Citrus | Self::Water | Self::Green | Self::Fruity => {
                Family::Fresh
            }
            Self::Floral | Self::SoftFloral | Self::FloralAmber => Family::Floral,
            Self::SoftAmber | Self::Amber | Self::WoodyAmber => Family::Amber,
            Self::Woods | Self::MossyWoods | Self::DryWoods => Family::Woody,
        }
    }
}

/// Key into the classification affinities of a preference profile.
///
/// Families and subfamilies share one mapping; the variant keeps names such
/// as `floral` or `amber`, which exist at both levels, apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "level", content = "name", rename_all = "snake_case")
)]
pub enum ClassKey {
    /// A primary family.
    Family(Family),
    /// A subfamily.
    Subfamily(Subfamily),
}

impl From<Family> for ClassKey {
    fn from(family: Family) -> Self {
        Self::Family(family)
    }
}

impl From<Subfamily> for ClassKey {
    fn from(subfamily: Subfamily) -> Self {
        Self::Subfamily(subfamily)
    }
}

/// Error returned when a family or subfamily name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationParseError {
    /// The family name is unknown.
    #[error("unknown fragrance family '{0}'")]
    UnknownFamily(String),
    /// The subfamily name is unknown.
    #[error("unknown fragrance subfamily '{0}'")]
    UnknownSubfamily(String),
}

fn normalise(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['-', ' '], "_")
}

impl FromStr for Family {
    type Err = ClassificationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalise(s);
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == name)
            .ok_or_else(|| ClassificationParseError::UnknownFamily(s.to_owned()))
    }
}

impl FromStr for Subfamily {
    type Err = ClassificationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalise(s);
        Self::ALL
            .into_iter()
            .find(|subfamily| subfamily.as_str() == name)
            .ok_or_else(|| ClassificationParseError::UnknownSubfamily(s.to_owned()))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Subfamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Family(family) => write!(f, "family:{family}"),
            Self::Subfamily(subfamily) => write!(f, "subfamily:{subfamily}"),
        }
    }
}
