//! Caller-level recommendation workflow.
//!
//! The [`Recommender`] reads a person's history and the candidate set from
//! a catalogue, builds their profile, scores and ranks candidates, and
//! applies the product rules the pure scoring functions leave out: a
//! minimum history size and a bounded result count.

use log::{debug, warn};
use serde::Serialize;
use sillage_core::{
    CandidatePolicy, CandidateSource, Family, FragranceId, FragranceSource, MatchResult, Matcher,
    PreferenceProfile, RatingSource, ReviewerId, Subfamily,
};

use crate::{
    AffinityMatcher, ProfileSummary, RankedFragrance, RecommendError, ScoringConfig,
    ScoringConfigError, build_profile, rank,
};

/// Fewest rating events a profile must rest on before it is used to score.
pub const DEFAULT_MIN_EVALUATIONS: usize = 3;
/// Smallest accepted recommendation limit.
pub const MIN_LIMIT: usize = 1;
/// Largest accepted recommendation limit.
pub const MAX_LIMIT: usize = 50;
/// Limit applied when the caller does not choose one.
pub const DEFAULT_LIMIT: usize = 10;

/// Per-request options for [`Recommender::recommend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Maximum number of recommendations, within `1..=50`.
    pub limit: usize,
    /// Leave out fragrances the person has already rated.
    pub exclude_rated: bool,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            exclude_rated: true,
        }
    }
}

impl RecommendOptions {
    const fn policy(self) -> CandidatePolicy {
        if self.exclude_rated {
            CandidatePolicy::ExcludeRated
        } else {
            CandidatePolicy::IncludeRated
        }
    }

    fn validate(self) -> Result<Self, RecommendError> {
        if self.limit < MIN_LIMIT || self.limit > MAX_LIMIT {
            return Err(RecommendError::InvalidLimit {
                limit: self.limit,
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            });
        }
        Ok(self)
    }
}

/// One ranked fragrance ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Fragrance identity.
    pub fragrance_id: FragranceId,
    /// Display name.
    pub name: String,
    /// Brand or house.
    pub brand: String,
    /// Primary family.
    pub family: Family,
    /// Subfamily.
    pub subfamily: Subfamily,
    /// Score, veto and component breakdown.
    #[serde(flatten)]
    pub result: MatchResult,
    /// Why the fragrance was vetoed, if it was.
    pub veto_reason: Option<String>,
}

impl From<RankedFragrance> for Recommendation {
    fn from(ranked: RankedFragrance) -> Self {
        let RankedFragrance { fragrance, result } = ranked;
        let veto_reason = result
            .veto
            .as_ref()
            .map(|veto| format!("Contains {} which you dislike", veto.name));
        Self {
            fragrance_id: fragrance.id,
            name: fragrance.name,
            brand: fragrance.brand,
            family: fragrance.family,
            subfamily: fragrance.subfamily,
            result,
            veto_reason,
        }
    }
}

/// Recommends fragrances to people from their rating histories.
///
/// # Examples
/// ```
/// use sillage_core::{ReviewerId, test_support::{MemoryCatalogue, fragrance_with_notes}};
/// use sillage_scorer::{RecommendOptions, Recommender};
///
/// let catalogue = MemoryCatalogue::default()
///     .with_fragrance(fragrance_with_notes("a", &["bergamot"]))
///     .with_fragrance(fragrance_with_notes("b", &["lemon"]))
///     .with_fragrance(fragrance_with_notes("c", &["musk"]))
///     .with_fragrance(fragrance_with_notes("d", &["bergamot", "musk"]))
///     .with_rating("ada", "a", 5)
///     .with_rating("ada", "b", 2)
///     .with_rating("ada", "c", 4);
///
/// let recommender = Recommender::new(catalogue);
/// let picks = recommender
///     .recommend(&ReviewerId::from("ada"), RecommendOptions::default())
///     .expect("enough history");
/// assert_eq!(picks.len(), 1);
/// assert_eq!(picks[0].fragrance_id.as_str(), "d");
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<S, M = AffinityMatcher> {
    source: S,
    matcher: M,
    config: ScoringConfig,
    min_evaluations: usize,
}

impl<S> Recommender<S, AffinityMatcher> {
    /// Recommender with the default scoring configuration.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            matcher: AffinityMatcher::default(),
            config: ScoringConfig::default(),
            min_evaluations: DEFAULT_MIN_EVALUATIONS,
        }
    }

    /// Recommender whose profile building and matching share `config`.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when `config` fails validation.
    pub fn with_config(source: S, config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        let matcher = AffinityMatcher::new(config)?;
        Ok(Self {
            source,
            matcher,
            config: *matcher.config(),
            min_evaluations: DEFAULT_MIN_EVALUATIONS,
        })
    }
}

impl<S, M> Recommender<S, M> {
    /// Recommender using a custom matcher, with profiles built under
    /// `config`.
    ///
    /// Only the rating centre and subfamily credit of `config` affect
    /// profile building; pass the same configuration the matcher was built
    /// with so both halves agree.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when `config` fails validation.
    pub fn with_matcher(
        source: S,
        matcher: M,
        config: ScoringConfig,
    ) -> Result<Self, ScoringConfigError> {
        Ok(Self {
            source,
            matcher,
            config: config.validate()?,
            min_evaluations: DEFAULT_MIN_EVALUATIONS,
        })
    }

    /// Configuration used to build profiles.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Change the minimum history size.
    #[must_use]
    pub const fn with_min_evaluations(mut self, min_evaluations: usize) -> Self {
        self.min_evaluations = min_evaluations;
        self
    }

    /// Minimum history size enforced by [`recommend`](Self::recommend).
    #[must_use]
    pub const fn min_evaluations(&self) -> usize {
        self.min_evaluations
    }

    /// The underlying catalogue.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

impl<S, M> Recommender<S, M>
where
    S: RatingSource + FragranceSource + CandidateSource,
    M: Matcher,
{
    /// Build the preference profile for `reviewer` without any gate.
    ///
    /// # Errors
    /// Returns [`RecommendError::Source`] when the history cannot be read.
    pub fn profile(&self, reviewer: &ReviewerId) -> Result<PreferenceProfile, RecommendError> {
        let events = self.source.ratings_for(reviewer)?;
        Ok(build_profile(&events, &self.config))
    }

    /// Rank candidate fragrances for `reviewer`.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidLimit`] for a limit outside
    /// `1..=50`, [`RecommendError::InsufficientData`] when the history is
    /// shorter than the minimum, and [`RecommendError::Source`] when the
    /// catalogue fails.
    pub fn recommend(
        &self,
        reviewer: &ReviewerId,
        options: RecommendOptions,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let checked = options.validate()?;
        let profile = self.gated_profile(reviewer)?;
        let candidates = self.source.candidates_for(reviewer, checked.policy())?;
        let ranked = rank(&self.matcher, &profile, candidates);
        debug!(
            "returning up to {} of {} ranked fragrances for {reviewer}",
            checked.limit,
            ranked.len()
        );
        Ok(ranked
            .into_iter()
            .take(checked.limit)
            .map(Recommendation::from)
            .collect())
    }

    /// Score one fragrance for `reviewer`, whether rated or not.
    ///
    /// # Errors
    /// Returns [`RecommendError::InsufficientData`] when the history is
    /// shorter than the minimum, [`RecommendError::UnknownFragrance`] when
    /// the catalogue lacks `fragrance`, and [`RecommendError::Source`] when
    /// the catalogue fails.
    pub fn match_fragrance(
        &self,
        reviewer: &ReviewerId,
        fragrance: &FragranceId,
    ) -> Result<Recommendation, RecommendError> {
        let profile = self.gated_profile(reviewer)?;
        let found = self
            .source
            .fragrance(fragrance)?
            .ok_or_else(|| RecommendError::UnknownFragrance(fragrance.clone()))?;
        let result = self.matcher.score(&profile, &found);
        Ok(Recommendation::from(RankedFragrance {
            fragrance: found,
            result,
        }))
    }

    /// Summarise the strongest likes and dislikes of `reviewer`.
    ///
    /// No minimum history applies.
    ///
    /// # Errors
    /// Returns [`RecommendError::Source`] when the history cannot be read.
    pub fn profile_summary(&self, reviewer: &ReviewerId) -> Result<ProfileSummary, RecommendError> {
        let profile = self.profile(reviewer)?;
        Ok(ProfileSummary::from_profile(reviewer.clone(), &profile))
    }

    fn gated_profile(&self, reviewer: &ReviewerId) -> Result<PreferenceProfile, RecommendError> {
        let profile = self.profile(reviewer)?;
        let found = profile.sample_size();
        if found < self.min_evaluations {
            warn!(
                "reviewer {reviewer} has {found} evaluations; {} required",
                self.min_evaluations
            );
            return Err(RecommendError::InsufficientData {
                required: self.min_evaluations,
                found,
            });
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use sillage_core::{
        Fragrance, MatchComponents, Note, NoteId, NotePosition,
        test_support::{MemoryCatalogue, fragrance_with_notes},
    };

    fn ada() -> ReviewerId {
        ReviewerId::from("ada")
    }

    #[fixture]
    fn catalogue() -> MemoryCatalogue {
        MemoryCatalogue::default()
            .with_fragrance(fragrance_with_notes("rated-bergamot", &["bergamot"]))
            .with_fragrance(fragrance_with_notes("rated-grapefruit", &["grapefruit"]))
            .with_fragrance(fragrance_with_notes("rated-lemon", &["lemon"]))
            .with_fragrance(fragrance_with_notes("new-bergamot", &["bergamot"]))
            .with_fragrance(fragrance_with_notes("new-lemon", &["lemon"]))
            .with_fragrance(fragrance_with_notes("new-vetiver", &["vetiver"]))
            .with_rating("ada", "rated-bergamot", 5)
            .with_rating("ada", "rated-grapefruit", 5)
            .with_rating("ada", "rated-lemon", 1)
    }

    fn ids(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations
            .iter()
            .map(|r| r.fragrance_id.as_str())
            .collect()
    }

    #[rstest]
    fn recommends_unrated_fragrances_in_rank_order(catalogue: MemoryCatalogue) {
        let recommender = Recommender::new(catalogue);
        let picks = recommender
            .recommend(&ada(), RecommendOptions::default())
            .expect("recommendations");
        assert_eq!(ids(&picks), vec!["new-bergamot", "new-vetiver", "new-lemon"]);
        assert!(picks.iter().all(|pick| pick.veto_reason.is_none()));
    }

    #[rstest]
    fn including_rated_fragrances_widens_the_candidate_set(catalogue: MemoryCatalogue) {
        let recommender = Recommender::new(catalogue);
        let options = RecommendOptions {
            exclude_rated: false,
            ..RecommendOptions::default()
        };
        let picks = recommender.recommend(&ada(), options).expect("recommendations");
        assert_eq!(picks.len(), 6);
    }

    #[rstest]
    fn limit_truncates_after_ranking(catalogue: MemoryCatalogue) {
        let recommender = Recommender::new(catalogue);
        let options = RecommendOptions {
            limit: 1,
            ..RecommendOptions::default()
        };
        let picks = recommender.recommend(&ada(), options).expect("recommendations");
        assert_eq!(ids(&picks), vec!["new-bergamot"]);
    }

    #[rstest]
    #[case(0)]
    #[case(51)]
    fn out_of_range_limit_is_rejected(catalogue: MemoryCatalogue, #[case] limit: usize) {
        let recommender = Recommender::new(catalogue);
        let options = RecommendOptions {
            limit,
            ..RecommendOptions::default()
        };
        let err = recommender
            .recommend(&ada(), options)
            .expect_err("invalid limit");
        assert!(matches!(
            err,
            RecommendError::InvalidLimit { limit: got, min: 1, max: 50 } if got == limit
        ));
    }

    #[rstest]
    fn short_history_is_insufficient_data() {
        let catalogue = MemoryCatalogue::default()
            .with_fragrance(fragrance_with_notes("a", &["musk"]))
            .with_fragrance(fragrance_with_notes("b", &["iris"]))
            .with_rating("ada", "a", 5)
            .with_rating("ada", "b", 4);
        let recommender = Recommender::new(catalogue);
        let err = recommender
            .recommend(&ada(), RecommendOptions::default())
            .expect_err("two events are not enough");
        assert!(err.is_insufficient_data());
        assert!(matches!(
            err,
            RecommendError::InsufficientData {
                required: 3,
                found: 2
            }
        ));
    }

    #[rstest]
    fn minimum_history_is_configurable() {
        let catalogue = MemoryCatalogue::default()
            .with_fragrance(fragrance_with_notes("a", &["musk"]))
            .with_fragrance(fragrance_with_notes("b", &["iris"]))
            .with_rating("ada", "a", 5);
        let recommender = Recommender::new(catalogue).with_min_evaluations(1);
        let picks = recommender
            .recommend(&ada(), RecommendOptions::default())
            .expect("one event suffices");
        assert_eq!(ids(&picks), vec!["b"]);
    }

    #[rstest]
    fn vetoed_fragrances_carry_a_reason(catalogue: MemoryCatalogue) {
        let catalogue = catalogue
            .with_fragrance(fragrance_with_notes("more-lemon-1", &["lemon"]))
            .with_fragrance(fragrance_with_notes("more-lemon-2", &["lemon"]))
            .with_rating("ada", "more-lemon-1", 1)
            .with_rating("ada", "more-lemon-2", 1);
        let recommender = Recommender::new(catalogue);
        let picks = recommender
            .recommend(&ada(), RecommendOptions::default())
            .expect("recommendations");

        let last = picks.last().expect("at least one pick");
        assert_eq!(last.fragrance_id.as_str(), "new-lemon");
        assert_eq!(last.result.score, 0.1);
        assert_eq!(
            last.veto_reason.as_deref(),
            Some("Contains lemon which you dislike")
        );
    }

    #[rstest]
    fn matching_a_single_fragrance(catalogue: MemoryCatalogue) {
        let recommender = Recommender::new(catalogue);
        let bergamot = recommender
            .match_fragrance(&ada(), &FragranceId::from("new-bergamot"))
            .expect("match");
        let lemon = recommender
            .match_fragrance(&ada(), &FragranceId::from("rated-lemon"))
            .expect("rated fragrances can be matched too");
        assert!(bergamot.result.components.notes > lemon.result.components.notes);
        assert!(!lemon.result.is_vetoed());
    }

    #[rstest]
    fn matching_an_unknown_fragrance_fails(catalogue: MemoryCatalogue) {
        let recommender = Recommender::new(catalogue);
        let err = recommender
            .match_fragrance(&ada(), &FragranceId::from("ghost"))
            .expect_err("unknown fragrance");
        assert!(matches!(err, RecommendError::UnknownFragrance(id) if id.as_str() == "ghost"));
    }

    #[rstest]
    fn summary_has_no_minimum_history() {
        let fragrance = Fragrance::builder("a", Family::Woody, Subfamily::Woods)
            .note(Note::new("cedar", "Cedar"), NotePosition::Base)
            .build()
            .expect("valid fragrance");
        let catalogue = MemoryCatalogue::default()
            .with_fragrance(fragrance)
            .with_rating("ada", "a", 5);
        let summary = Recommender::new(catalogue)
            .profile_summary(&ada())
            .expect("summary");
        assert_eq!(summary.evaluation_count, 1);
        assert_eq!(
            summary.liked_notes.first().map(|n| n.name.as_str()),
            Some("Cedar")
        );
    }

    #[rstest]
    fn custom_matchers_plug_in(catalogue: MemoryCatalogue) {
        struct Flat;
        impl Matcher for Flat {
            fn score(&self, _: &PreferenceProfile, _: &Fragrance) -> MatchResult {
                MatchResult::scored(0.5, MatchComponents::default())
            }
        }
        let recommender = Recommender::with_matcher(catalogue, Flat, ScoringConfig::default())
            .expect("default config is valid");
        let picks = recommender
            .recommend(&ada(), RecommendOptions::default())
            .expect("recommendations");
        assert_eq!(
            ids(&picks),
            vec!["new-bergamot", "new-lemon", "new-vetiver"]
        );
    }

    #[rstest]
    fn custom_matcher_profiles_follow_supplied_config(catalogue: MemoryCatalogue) {
        struct Centred;
        impl Matcher for Centred {
            fn score(&self, profile: &PreferenceProfile, fragrance: &Fragrance) -> MatchResult {
                let affinity = fragrance
                    .iter_notes()
                    .map(|note| profile.note_affinity(&note.id))
                    .sum::<f64>();
                MatchResult::scored(
                    0.5,
                    MatchComponents {
                        notes: affinity,
                        ..MatchComponents::default()
                    },
                )
            }
        }
        let config = ScoringConfig {
            rating_centre: 4,
            subfamily_credit: 1.0,
            ..ScoringConfig::default()
        };
        let recommender =
            Recommender::with_matcher(catalogue, Centred, config).expect("valid config");
        assert_eq!(recommender.config(), &config);

        let profile = recommender.profile(&ada()).expect("profile");
        assert_eq!(profile.note_affinity(&NoteId::from("bergamot")), 1.0);
        assert_eq!(profile.note_affinity(&NoteId::from("lemon")), -3.0);
        assert_eq!(profile.subfamily_affinity(Subfamily::Citrus), -1.0);

        let matched = recommender
            .match_fragrance(&ada(), &FragranceId::from("new-bergamot"))
            .expect("match");
        assert_eq!(matched.result.components.notes, 1.0);
    }

    #[rstest]
    fn custom_matcher_rejects_invalid_profile_config(catalogue: MemoryCatalogue) {
        struct Flat;
        impl Matcher for Flat {
            fn score(&self, _: &PreferenceProfile, _: &Fragrance) -> MatchResult {
                MatchResult::scored(0.5, MatchComponents::default())
            }
        }
        let config = ScoringConfig {
            rating_centre: 0,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            Recommender::with_matcher(catalogue, Flat, config),
            Err(ScoringConfigError::RatingCentreOutOfRange(0))
        ));
    }

    #[rstest]
    fn invalid_scoring_config_is_rejected(catalogue: MemoryCatalogue) {
        let config = ScoringConfig {
            vetoed_score: 2.0,
            ..ScoringConfig::default()
        };
        assert!(Recommender::with_config(catalogue, config).is_err());
    }

    #[rstest]
    fn source_failures_propagate() {
        let catalogue = MemoryCatalogue::default().with_rating("ada", "ghost", 4);
        let err = Recommender::new(catalogue)
            .profile_summary(&ada())
            .expect_err("dangling rating");
        assert!(matches!(err, RecommendError::Source(_)));
    }
}
