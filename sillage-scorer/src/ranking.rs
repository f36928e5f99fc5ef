//! Order scored fragrances for presentation.

use log::debug;
use sillage_core::{Fragrance, MatchResult, Matcher, PreferenceProfile};

/// A fragrance paired with its match result.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFragrance {
    /// The scored fragrance.
    pub fragrance: Fragrance,
    /// Outcome of scoring it.
    pub result: MatchResult,
}

/// Score every candidate and return them in ranking order.
///
/// Non-vetoed fragrances come before vetoed ones; each group is sorted by
/// score descending. The sort is stable, so equal scores keep candidate
/// order.
pub fn rank<M, I>(matcher: &M, profile: &PreferenceProfile, candidates: I) -> Vec<RankedFragrance>
where
    M: Matcher + ?Sized,
    I: IntoIterator<Item = Fragrance>,
{
    let mut ranked: Vec<RankedFragrance> = candidates
        .into_iter()
        .map(|fragrance| {
            let result = matcher.score(profile, &fragrance);
            RankedFragrance { fragrance, result }
        })
        .collect();
    sort_ranked(&mut ranked);
    debug!(
        "ranked {} candidates ({} vetoed)",
        ranked.len(),
        ranked.iter().filter(|r| r.result.is_vetoed()).count()
    );
    ranked
}

/// Sort already-scored fragrances into ranking order in place.
pub fn sort_ranked(ranked: &mut [RankedFragrance]) {
    ranked.sort_by(|left, right| left.result.ranking_cmp(&right.result));
}
