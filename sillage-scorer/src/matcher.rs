//! Affinity-based implementation of [`Matcher`].

use sillage_core::{
    ClassKey, Fragrance, MatchComponents, MatchResult, Matcher, PreferenceProfile, Veto,
};

use crate::{ScoringConfig, ScoringConfigError};

/// Scores fragrances by the weighted, logistic-squashed sum of note, accord,
/// family and subfamily affinities.
///
/// A note whose affinity falls strictly below the veto threshold overrides
/// everything else: the fragrance scores the configured vetoed score and
/// the first such note in listing order is reported.
///
/// # Examples
/// ```
/// use sillage_core::{Family, Fragrance, Matcher, PreferenceProfile, Subfamily};
/// use sillage_scorer::AffinityMatcher;
///
/// # fn main() -> Result<(), sillage_core::FragranceError> {
/// let fragrance = Fragrance::builder("f-1", Family::Woody, Subfamily::Woods).build()?;
/// let result = AffinityMatcher::default().score(&PreferenceProfile::new(), &fragrance);
/// assert_eq!(result.score, 0.5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AffinityMatcher {
    config: ScoringConfig,
}

impl AffinityMatcher {
    /// Build a matcher from a validated configuration.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when `config` fails validation.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    fn find_veto(&self, profile: &PreferenceProfile, fragrance: &Fragrance) -> Option<Veto> {
        fragrance
            .iter_notes()
            .find(|note| profile.note_affinity(&note.id) < self.config.veto_threshold)
            .map(|note| Veto {
                note: note.id.clone(),
                name: note.name.clone(),
            })
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "match components are weighted floating-point sums"
    )]
    fn components(&self, profile: &PreferenceProfile, fragrance: &Fragrance) -> MatchComponents {
        let notes = mean(
            fragrance
                .iter_notes()
                .map(|note| profile.note_affinity(&note.id)),
        );
        let accords = mean(
            fragrance
                .accords()
                .iter()
                .map(|(accord, intensity)| profile.accord_affinity(accord) * intensity.get()),
        );
        let family = profile.class_affinity(ClassKey::Family(fragrance.family));
        let subfamily = profile.class_affinity(ClassKey::Subfamily(fragrance.subfamily));

        let weights = self.config.weights;
        let raw = notes * weights.notes
            + accords * weights.accords
            + family * weights.family
            + subfamily * weights.subfamily;

        MatchComponents {
            notes,
            accords,
            family,
            subfamily,
            raw,
        }
    }
}

impl Matcher for AffinityMatcher {
    fn score(&self, profile: &PreferenceProfile, fragrance: &Fragrance) -> MatchResult {
        if let Some(veto) = self.find_veto(profile, fragrance) {
            return MatchResult::vetoed(self.config.vetoed_score, veto);
        }
        let components = self.components(profile, fragrance);
        MatchResult::scored(logistic(components.raw), components)
    }
}

/// Arithmetic mean; zero for an empty sequence.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "tag counts are far below the f64 mantissa limit"
)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), value| {
        (sum + value, count.saturating_add(1))
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Logistic transform kept inside the open unit interval.
///
/// Raw scores beyond roughly ±37 round to exactly `0.0` or `1.0` in `f64`;
/// the result is pinned one step inside the bounds instead.
#[expect(
    clippy::float_arithmetic,
    reason = "the logistic transform is floating-point by definition"
)]
fn logistic(raw: f64) -> f64 {
    let squashed = 1.0 / (1.0 + (-raw).exp());
    squashed.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use sillage_core::{
        AccordId, Family, Note, NoteId, NotePosition, Subfamily,
        test_support::fragrance_with_notes,
    };

    const TOLERANCE: f64 = 1e-12;

    #[fixture]
    fn matcher() -> AffinityMatcher {
        AffinityMatcher::default()
    }

    fn profile_with_notes(notes: &[(&str, f64)]) -> PreferenceProfile {
        let mut profile = PreferenceProfile::new();
        for (id, affinity) in notes {
            profile.credit_note(&Note::new(*id, *id), *affinity);
        }
        profile
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    fn empty_profile_scores_neutral(matcher: AffinityMatcher) {
        let fragrance = fragrance_with_notes("f", &["bergamot", "musk"]);
        let result = matcher.score(&PreferenceProfile::new(), &fragrance);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.score_percent, 50);
        assert!(!result.is_vetoed());
        assert_eq!(result.components, MatchComponents::default());
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn fragrance_without_tags_scores_on_classification_only(matcher: AffinityMatcher) {
        let mut profile = PreferenceProfile::new();
        profile.credit_class(ClassKey::Family(Family::Fresh), 1.0);
        profile.credit_class(ClassKey::Subfamily(Subfamily::Citrus), 2.0);

        let result = matcher.score(&profile, &fragrance_with_notes("bare", &[]));

        assert_eq!(result.components.notes, 0.0);
        assert_eq!(result.components.accords, 0.0);
        assert_close(result.components.raw, 0.2 + 0.2);
        assert_close(result.score, 1.0 / (1.0 + (-0.4_f64).exp()));
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn components_use_means_and_intensity(matcher: AffinityMatcher) {
        let mut profile = profile_with_notes(&[("rose", 2.0), ("oud", -1.0)]);
        profile.credit_accord(&AccordId::from("balsamic"), 4.0);
        profile.credit_accord(&AccordId::from("rose"), 1.0);
        profile.credit_class(ClassKey::Family(Family::Floral), 1.5);
        profile.credit_class(ClassKey::Subfamily(Subfamily::FloralAmber), -0.5);

        let fragrance = Fragrance::builder("f", Family::Floral, Subfamily::FloralAmber)
            .note(Note::new("rose", "Rose"), NotePosition::Heart)
            .note(Note::new("oud", "Oud"), NotePosition::Base)
            .accord("balsamic", 0.5)
            .accord("rose", 1.0)
            .build()
            .expect("valid fragrance");

        let result = matcher.score(&profile, &fragrance);
        let components = result.components;
        assert_close(components.notes, 0.5);
        assert_close(components.accords, 1.5);
        assert_close(components.family, 1.5);
        assert_close(components.subfamily, -0.5);
        assert_close(components.raw, 0.4 * 0.5 + 0.3 * 1.5 + 0.2 * 1.5 + 0.1 * -0.5);
        assert!(result.score > 0.5 && result.score < 1.0);
    }

    #[rstest]
    fn note_at_threshold_does_not_veto(matcher: AffinityMatcher) {
        let profile = profile_with_notes(&[("lemon", -3.0)]);
        let result = matcher.score(&profile, &fragrance_with_notes("f", &["lemon"]));
        assert!(!result.is_vetoed());
        assert!(result.score < 0.5);
    }

    #[rstest]
    fn note_below_threshold_vetoes(matcher: AffinityMatcher) {
        let mut profile = profile_with_notes(&[("lemon", -6.0), ("bergamot", 50.0)]);
        profile.credit_class(ClassKey::Family(Family::Fresh), 100.0);

        let result = matcher.score(
            &profile,
            &fragrance_with_notes("f", &["bergamot", "lemon"]),
        );

        assert!(result.is_vetoed());
        assert_eq!(result.score, 0.1);
        assert_eq!(result.score_percent, 10);
        assert_eq!(result.components, MatchComponents::default());
        let veto = result.veto.expect("veto details");
        assert_eq!(veto.note, NoteId::from("lemon"));
        assert_eq!(veto.name, "lemon");
    }

    #[rstest]
    fn first_disliked_note_in_listing_order_is_reported(matcher: AffinityMatcher) {
        let profile = profile_with_notes(&[("lemon", -4.0), ("lime", -9.0)]);
        let result = matcher.score(&profile, &fragrance_with_notes("f", &["lime", "lemon"]));
        assert_eq!(
            result.veto.map(|veto| veto.note),
            Some(NoteId::from("lime"))
        );
    }

    #[rstest]
    fn extreme_affinities_stay_inside_unit_interval(matcher: AffinityMatcher) {
        let high = profile_with_notes(&[("musk", 1e6)]);
        let low = profile_with_notes(&[("musk", -2.0)]);
        let mut very_low = low.clone();
        very_low.credit_class(ClassKey::Family(Family::Fresh), -1e6);

        let fragrance = fragrance_with_notes("f", &["musk"]);
        let top = matcher.score(&high, &fragrance);
        let bottom = matcher.score(&very_low, &fragrance);

        assert!(top.score > 0.0 && top.score < 1.0);
        assert!(bottom.score > 0.0 && bottom.score < 1.0);
        assert_eq!(top.score_percent, 99);
        assert_eq!(bottom.score_percent, 0);
    }

    #[rstest]
    fn custom_threshold_is_honoured() {
        let config = ScoringConfig {
            veto_threshold: -1.0,
            vetoed_score: 0.0,
            ..ScoringConfig::default()
        };
        let matcher = AffinityMatcher::new(config).expect("valid config");
        let profile = profile_with_notes(&[("lemon", -2.0)]);
        let result = matcher.score(&profile, &fragrance_with_notes("f", &["lemon"]));
        assert!(result.is_vetoed());
        assert_eq!(result.score, 0.0);
    }

    #[rstest]
    fn invalid_config_is_rejected() {
        let config = ScoringConfig {
            rating_centre: 9,
            ..ScoringConfig::default()
        };
        assert_eq!(
            AffinityMatcher::new(config),
            Err(ScoringConfigError::RatingCentreOutOfRange(9))
        );
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    #[case(0.0, 0.5)]
    #[case(1000.0, 1.0 - f64::EPSILON)]
    #[case(-1000.0, f64::MIN_POSITIVE)]
    fn logistic_handles_bounds(#[case] raw: f64, #[case] expected: f64) {
        assert_eq!(logistic(raw), expected);
    }

    #[rstest]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
        assert_close(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
    }
}
