//! Fold a rating history into a [`PreferenceProfile`].

use log::debug;
use sillage_core::{ClassKey, PreferenceProfile, RatingEvent};

use crate::ScoringConfig;

/// Build a preference profile from one person's rating history.
///
/// Each event contributes a signed weight of `stars - rating_centre`. The
/// weight is added unscaled to every note on the rated fragrance, scaled
/// by intensity for each accord, added to the primary family and scaled by
/// `subfamily_credit` for the subfamily. Affinities are raw sums; nothing
/// is normalised here.
///
/// Ratings are validated when a [`sillage_core::Rating`] is constructed, so
/// building cannot fail. An empty history yields an empty profile with a
/// sample size of zero.
///
/// # Examples
/// ```
/// use sillage_core::{Family, Fragrance, Note, NotePosition, NoteId, Rating, RatingEvent, Subfamily};
/// use sillage_scorer::{ScoringConfig, build_profile};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fragrance = Fragrance::builder("f-1", Family::Fresh, Subfamily::Citrus)
///     .note(Note::new("bergamot", "Bergamot"), NotePosition::Top)
///     .build()?;
/// let events = [RatingEvent::new(fragrance, Rating::new(5)?)];
/// let profile = build_profile(&events, &ScoringConfig::default());
/// assert_eq!(profile.note_affinity(&NoteId::from("bergamot")), 2.0);
/// assert_eq!(profile.sample_size(), 1);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "accord and subfamily credits scale the rating weight"
)]
pub fn build_profile<'a, I>(events: I, config: &ScoringConfig) -> PreferenceProfile
where
    I: IntoIterator<Item = &'a RatingEvent>,
{
    let mut profile = PreferenceProfile::new();
    for event in events {
        let weight = event.rating.weight(config.rating_centre);
        let fragrance = &event.fragrance;

        for note in fragrance.iter_notes() {
            profile.credit_note(note, weight);
        }
        for (accord, intensity) in fragrance.accords() {
            profile.credit_accord(accord, weight * intensity.get());
        }
        profile.credit_class(ClassKey::Family(fragrance.family), weight);
        profile.credit_class(
            ClassKey::Subfamily(fragrance.subfamily),
            weight * config.subfamily_credit,
        );
        profile.record_sample();
    }
    debug!(
        "built preference profile from {} rating events",
        profile.sample_size()
    );
    profile
}
