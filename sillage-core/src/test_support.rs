//! Test-only, in-memory catalogue used by unit and behaviour tests.

use std::collections::BTreeMap;

use crate::{
    CandidatePolicy, CandidateSource, Family, Fragrance, FragranceId, FragranceNote,
    FragranceSource, Note, NotePosition, Rating, RatingEvent, RatingSource, ReviewerId,
    SourceError, Subfamily,
};

/// In-memory catalogue implementing every collaborator source.
///
/// Ratings keep their raw star value so tests can exercise the validation
/// path; an out-of-range value surfaces as a [`SourceError::Backend`] when
/// the history is read.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogue {
    fragrances: BTreeMap<FragranceId, Fragrance>,
    ratings: Vec<(ReviewerId, FragranceId, u8)>,
}

impl MemoryCatalogue {
    /// Add a fragrance, replacing any previous entry with the same id.
    #[must_use]
    pub fn with_fragrance(mut self, fragrance: Fragrance) -> Self {
        self.insert_fragrance(fragrance);
        self
    }

    /// Record a rating while returning `self` for chaining.
    #[must_use]
    pub fn with_rating(
        mut self,
        reviewer: impl Into<ReviewerId>,
        fragrance: impl Into<FragranceId>,
        stars: u8,
    ) -> Self {
        self.insert_rating(reviewer, fragrance, stars);
        self
    }

    /// Add a fragrance, replacing any previous entry with the same id.
    pub fn insert_fragrance(&mut self, fragrance: Fragrance) {
        self.fragrances.insert(fragrance.id.clone(), fragrance);
    }

    /// Record a rating.
    pub fn insert_rating(
        &mut self,
        reviewer: impl Into<ReviewerId>,
        fragrance: impl Into<FragranceId>,
        stars: u8,
    ) {
        self.ratings.push((reviewer.into(), fragrance.into(), stars));
    }

    fn rated_by<'a>(&'a self, reviewer: &'a ReviewerId) -> impl Iterator<Item = &'a FragranceId> {
        self.ratings
            .iter()
            .filter(move |(who, _, _)| who == reviewer)
            .map(|(_, fragrance, _)| fragrance)
    }
}

impl RatingSource for MemoryCatalogue {
    fn ratings_for(&self, reviewer: &ReviewerId) -> Result<Vec<RatingEvent>, SourceError> {
        self.ratings
            .iter()
            .filter(|(who, _, _)| who == reviewer)
            .map(|(_, fragrance_id, stars)| {
                let fragrance = self
                    .fragrances
                    .get(fragrance_id)
                    .cloned()
                    .ok_or_else(|| SourceError::MissingFragrance(fragrance_id.clone()))?;
                let rating = Rating::new(*stars).map_err(|source| SourceError::Backend {
                    operation: "decode in-memory rating",
                    source: Box::new(source),
                })?;
                Ok(RatingEvent::new(fragrance, rating))
            })
            .collect()
    }
}

impl FragranceSource for MemoryCatalogue {
    fn fragrance(&self, id: &FragranceId) -> Result<Option<Fragrance>, SourceError> {
        Ok(self.fragrances.get(id).cloned())
    }
}

impl CandidateSource for MemoryCatalogue {
    fn candidates_for(
        &self,
        reviewer: &ReviewerId,
        policy: CandidatePolicy,
    ) -> Result<Vec<Fragrance>, SourceError> {
        let rated: Vec<&FragranceId> = match policy {
            CandidatePolicy::ExcludeRated => self.rated_by(reviewer).collect(),
            CandidatePolicy::IncludeRated => Vec::new(),
        };
        Ok(self
            .fragrances
            .values()
            .filter(|fragrance| !rated.contains(&&fragrance.id))
            .cloned()
            .collect())
    }
}

/// Build a fresh/citrus fragrance whose notes use their ids as names.
///
/// Duplicate ids are kept as given; callers are expected to pass distinct
/// notes.
#[must_use]
pub fn fragrance_with_notes(id: &str, notes: &[&str]) -> Fragrance {
    Fragrance {
        id: FragranceId::from(id),
        name: id.to_owned(),
        brand: "Test House".to_owned(),
        family: Family::Fresh,
        subfamily: Subfamily::Citrus,
        notes: notes
            .iter()
            .map(|note| FragranceNote::new(Note::new(*note, *note), NotePosition::Heart))
            .collect(),
        accords: BTreeMap::new(),
    }
}

/// Persist fragrances and `(reviewer, fragrance, stars)` ratings into a new
/// SQLite catalogue at `path`.
///
/// Star values are written verbatim so tests can store out-of-range ratings.
///
/// # Errors
/// Returns [`rusqlite::Error`] when the database cannot be created or a row
/// cannot be inserted.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_catalogue(
    path: &std::path::Path,
    fragrances: &[Fragrance],
    ratings: &[(&str, &str, i64)],
) -> rusqlite::Result<()> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(crate::store::SCHEMA_SQL)?;
    let tx = connection.transaction()?;
    for fragrance in fragrances {
        tx.execute(
            "INSERT INTO fragrances (id, name, brand, primary_family, subfamily)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                fragrance.id.as_str(),
                fragrance.name,
                fragrance.brand,
                fragrance.family.as_str(),
                fragrance.subfamily.as_str(),
            ],
        )?;
        for placed in fragrance.notes() {
            tx.execute(
                "INSERT OR IGNORE INTO notes (id, name) VALUES (?1, ?2)",
                rusqlite::params![placed.note.id.as_str(), placed.note.name],
            )?;
            tx.execute(
                "INSERT INTO fragrance_notes (fragrance_id, note_id, position)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    fragrance.id.as_str(),
                    placed.note.id.as_str(),
                    placed.position.as_str(),
                ],
            )?;
        }
        for (accord, intensity) in fragrance.accords() {
            tx.execute(
                "INSERT INTO fragrance_accords (fragrance_id, accord_type, intensity)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![fragrance.id.as_str(), accord.as_str(), intensity.get()],
            )?;
        }
    }
    for (index, (reviewer, fragrance, stars)) in ratings.iter().enumerate() {
        tx.execute(
            "INSERT INTO evaluations (id, fragrance_id, reviewer_id, rating)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![format!("e-{index:04}"), fragrance, reviewer, stars],
        )?;
    }
    tx.commit()
}
