//! Preference profiles: per-person signed affinities over fragrance tags.
//!
//! A profile is derived data. It is rebuilt from a person's rating history
//! and never persisted by the core. Affinities are raw accumulated sums and
//! may grow without bound; normalisation happens at scoring time.
//!
//! Lookups for tags the profile has never seen return `0.0` ("no signal")
//! rather than failing.

use std::collections::BTreeMap;

use crate::{AccordId, ClassKey, Family, Note, NoteId, Subfamily};

/// Signed affinities for notes, accords and classification levels.
///
/// Maps are ordered so iteration, and anything derived from it, is
/// deterministic.
///
/// # Examples
/// ```
/// use sillage_core::{Family, Note, NoteId, PreferenceProfile};
///
/// let mut profile = PreferenceProfile::new();
/// profile.credit_note(&Note::new("bergamot", "Bergamot"), 2.0);
/// profile.credit_class(Family::Fresh.into(), 2.0);
/// profile.record_sample();
///
/// assert_eq!(profile.note_affinity(&NoteId::from("bergamot")), 2.0);
/// assert_eq!(profile.note_affinity(&NoteId::from("lemon")), 0.0);
/// assert_eq!(profile.family_affinity(Family::Fresh), 2.0);
/// assert_eq!(profile.sample_size(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreferenceProfile {
    notes: BTreeMap<NoteId, f64>,
    note_names: BTreeMap<NoteId, String>,
    accords: BTreeMap<AccordId, f64>,
    classes: BTreeMap<ClassKey, f64>,
    sample_size: usize,
}

impl PreferenceProfile {
    /// Construct an empty profile with a sample size of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Affinity for a note, `0.0` when unseen.
    #[must_use]
    pub fn note_affinity(&self, note: &NoteId) -> f64 {
        self.notes.get(note).copied().unwrap_or(0.0)
    }

    /// Affinity for an accord, `0.0` when unseen.
    #[must_use]
    pub fn accord_affinity(&self, accord: &AccordId) -> f64 {
        self.accords.get(accord).copied().unwrap_or(0.0)
    }

    /// Affinity for a family or subfamily key, `0.0` when unseen.
    #[must_use]
    pub fn class_affinity(&self, key: ClassKey) -> f64 {
        self.classes.get(&key).copied().unwrap_or(0.0)
    }

    /// Affinity for a primary family.
    #[must_use]
    pub fn family_affinity(&self, family: Family) -> f64 {
        self.class_affinity(ClassKey::Family(family))
    }

    /// Affinity for a subfamily.
    #[must_use]
    pub fn subfamily_affinity(&self, subfamily: Subfamily) -> f64 {
        self.class_affinity(ClassKey::Subfamily(subfamily))
    }

    /// Number of rating events folded into this profile.
    #[must_use]
    pub const fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Report whether the profile carries no affinities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.accords.is_empty() && self.classes.is_empty()
    }

    /// Display name recorded for a note, if the note has been seen.
    #[must_use]
    pub fn note_name(&self, note: &NoteId) -> Option<&str> {
        self.note_names.get(note).map(String::as_str)
    }

    /// Iterate over note affinities in identifier order.
    pub fn notes(&self) -> impl Iterator<Item = (&NoteId, f64)> {
        self.notes.iter().map(|(id, affinity)| (id, *affinity))
    }

    /// Iterate over accord affinities in identifier order.
    pub fn accords(&self) -> impl Iterator<Item = (&AccordId, f64)> {
        self.accords.iter().map(|(id, affinity)| (id, *affinity))
    }

    /// Iterate over classification affinities, families before subfamilies.
    pub fn classes(&self) -> impl Iterator<Item = (ClassKey, f64)> + '_ {
        self.classes.iter().map(|(key, affinity)| (*key, *affinity))
    }

    /// Add `amount` to a note's running affinity.
    #[expect(
        clippy::float_arithmetic,
        reason = "affinities are accumulated floating-point sums"
    )]
    pub fn credit_note(&mut self, note: &Note, amount: f64) {
        *self.notes.entry(note.id.clone()).or_insert(0.0) += amount;
        self.note_names
            .entry(note.id.clone())
            .or_insert_with(|| note.name.clone());
    }

    /// Add `amount` to an accord's running affinity.
    #[expect(
        clippy::float_arithmetic,
        reason = "affinities are accumulated floating-point sums"
    )]
    pub fn credit_accord(&mut self, accord: &AccordId, amount: f64) {
        *self.accords.entry(accord.clone()).or_insert(0.0) += amount;
    }

    /// Add `amount` to a family or subfamily running affinity.
    #[expect(
        clippy::float_arithmetic,
        reason = "affinities are accumulated floating-point sums"
    )]
    pub fn credit_class(&mut self, key: ClassKey, amount: f64) {
        *self.classes.entry(key).or_insert(0.0) += amount;
    }

    /// Count one more rating event towards the sample size.
    pub const fn record_sample(&mut self) {
        self.sample_size = self.sample_size.saturating_add(1);
    }
}
