//! Human-facing digest of a preference profile.

use std::cmp::Ordering;

use serde::Serialize;
use sillage_core::{AccordId, ClassKey, NoteId, PreferenceProfile, ReviewerId};

/// Entries kept in each summary list.
pub const SUMMARY_LENGTH: usize = 5;

/// A note and the person's affinity for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteAffinity {
    /// Note identity.
    pub id: NoteId,
    /// Display name.
    pub name: String,
    /// Accumulated affinity.
    pub affinity: f64,
}

/// An accord and the person's affinity for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccordAffinity {
    /// Accord identity.
    pub id: AccordId,
    /// Accumulated affinity.
    pub affinity: f64,
}

/// A family or subfamily and the person's affinity for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassAffinity {
    /// Family or subfamily.
    pub class: ClassKey,
    /// Accumulated affinity.
    pub affinity: f64,
}

/// The strongest signals in a preference profile.
///
/// Ties are broken by identifier so summaries are stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    /// Whose profile this is.
    pub reviewer: ReviewerId,
    /// Rating events behind the profile.
    pub evaluation_count: usize,
    /// Notes with positive affinity, strongest first.
    pub liked_notes: Vec<NoteAffinity>,
    /// Notes with negative affinity, most disliked first.
    pub disliked_notes: Vec<NoteAffinity>,
    /// Accords by affinity, highest first.
    pub top_accords: Vec<AccordAffinity>,
    /// Families and subfamilies by affinity, highest first.
    pub top_classes: Vec<ClassAffinity>,
}

impl ProfileSummary {
    /// Summarise `profile` for `reviewer`.
    #[must_use]
    pub fn from_profile(reviewer: ReviewerId, profile: &PreferenceProfile) -> Self {
        let notes: Vec<NoteAffinity> = profile
            .notes()
            .map(|(id, affinity)| NoteAffinity {
                id: id.clone(),
                name: profile
                    .note_name(id)
                    .map_or_else(|| id.to_string(), str::to_owned),
                affinity,
            })
            .collect();

        let mut liked: Vec<NoteAffinity> =
            notes.iter().filter(|n| n.affinity > 0.0).cloned().collect();
        liked.sort_by(|a, b| descending(a.affinity, b.affinity).then_with(|| a.id.cmp(&b.id)));
        liked.truncate(SUMMARY_LENGTH);

        let mut disliked: Vec<NoteAffinity> =
            notes.into_iter().filter(|n| n.affinity < 0.0).collect();
        disliked.sort_by(|a, b| {
            a.affinity
                .total_cmp(&b.affinity)
                .then_with(|| a.id.cmp(&b.id))
        });
        disliked.truncate(SUMMARY_LENGTH);

        let mut top_accords: Vec<AccordAffinity> = profile
            .accords()
            .map(|(id, affinity)| AccordAffinity {
                id: id.clone(),
                affinity,
            })
            .collect();
        top_accords
            .sort_by(|a, b| descending(a.affinity, b.affinity).then_with(|| a.id.cmp(&b.id)));
        top_accords.truncate(SUMMARY_LENGTH);

        let mut top_classes: Vec<ClassAffinity> = profile
            .classes()
            .map(|(class, affinity)| ClassAffinity { class, affinity })
            .collect();
        top_classes.sort_by(|a, b| {
            descending(a.affinity, b.affinity).then_with(|| a.class.cmp(&b.class))
        });
        top_classes.truncate(SUMMARY_LENGTH);

        Self {
            reviewer,
            evaluation_count: profile.sample_size(),
            liked_notes: liked,
            disliked_notes: disliked,
            top_accords,
            top_classes,
        }
    }
}

fn descending(left: f64, right: f64) -> Ordering {
    right.total_cmp(&left)
}
