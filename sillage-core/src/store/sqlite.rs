//! SQLite-backed, read-only catalogue of fragrances and ratings.
//!
//! The database layout follows the fragrance rater schema: `fragrances`,
//! `notes`, `fragrance_notes`, `fragrance_accords` and `evaluations`. Rows
//! that violate the domain rules (unknown family names, ratings outside
//! `1..=5`, intensities outside `[0, 1]`) are reported, never repaired.
//!
//! Every `subfamily` must name one of the fourteen wheel subfamilies and
//! belong to its row's `primary_family`. Bulk importers that copy the
//! family into `subfamily` (`woody`, `fresh`) or leave it blank produce
//! catalogues this reader rejects: a single such row fails every candidate
//! listing. Copied families only pass where the names coincide (`floral`,
//! `amber`). Normalise subfamilies before pointing the catalogue at an
//! imported database.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use thiserror::Error;

use crate::{
    CandidatePolicy, CandidateSource, ClassificationParseError, Family, Fragrance, FragranceError,
    FragranceId, FragranceSource, Note, NotePosition, NotePositionParseError, Rating, RatingError,
    RatingEvent, RatingSource, ReviewerId, SourceError, Subfamily,
};

/// Tables the catalogue reads from.
const REQUIRED_TABLES: [&str; 5] = [
    "fragrances",
    "notes",
    "fragrance_notes",
    "fragrance_accords",
    "evaluations",
];

/// Schema understood by [`SqliteCatalogue`]; used by fixtures that need to
/// create a compatible database.
pub(crate) const SCHEMA_SQL: &str = "
CREATE TABLE fragrances (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    brand TEXT NOT NULL,
    primary_family TEXT NOT NULL,
    subfamily TEXT NOT NULL
);
CREATE TABLE notes (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE fragrance_notes (
    fragrance_id TEXT NOT NULL REFERENCES fragrances(id) ON DELETE CASCADE,
    note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
    position TEXT NOT NULL,
    PRIMARY KEY (fragrance_id, note_id)
);
CREATE TABLE fragrance_accords (
    fragrance_id TEXT NOT NULL REFERENCES fragrances(id) ON DELETE CASCADE,
    accord_type TEXT NOT NULL,
    intensity REAL NOT NULL,
    PRIMARY KEY (fragrance_id, accord_type)
);
CREATE TABLE evaluations (
    id TEXT PRIMARY KEY,
    fragrance_id TEXT NOT NULL REFERENCES fragrances(id) ON DELETE CASCADE,
    reviewer_id TEXT NOT NULL,
    rating INTEGER NOT NULL
);
CREATE INDEX evaluations_reviewer ON evaluations(reviewer_id);
";

const FRAGRANCE_SQL: &str =
    "SELECT name, brand, primary_family, subfamily FROM fragrances WHERE id = ?1";
const NOTES_SQL: &str = "SELECT notes.id, notes.name, placed.position
     FROM fragrance_notes AS placed
     JOIN notes ON notes.id = placed.note_id
     WHERE placed.fragrance_id = ?1
     ORDER BY notes.id";
const ACCORDS_SQL: &str = "SELECT accord_type, intensity FROM fragrance_accords
     WHERE fragrance_id = ?1 ORDER BY accord_type";
const RATINGS_SQL: &str = "SELECT fragrance_id, rating FROM evaluations
     WHERE reviewer_id = ?1 ORDER BY id";
const ALL_IDS_SQL: &str = "SELECT id FROM fragrances ORDER BY id";
const UNRATED_IDS_SQL: &str = "SELECT id FROM fragrances
     WHERE id NOT IN (SELECT fragrance_id FROM evaluations WHERE reviewer_id = ?1)
     ORDER BY id";

/// Errors raised while opening or reading a SQLite catalogue.
#[derive(Debug, Error)]
pub enum SqliteCatalogueError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A table the catalogue depends on does not exist.
    #[error("catalogue database is missing the `{table}` table")]
    MissingTable {
        /// Name of the absent table.
        table: &'static str,
    },
    /// A fragrance row named an unknown family or subfamily.
    #[error("fragrance {fragrance} has an invalid classification: {source}")]
    InvalidClassification {
        /// Fragrance whose row failed to parse.
        fragrance: FragranceId,
        /// Parse failure.
        #[source]
        source: ClassificationParseError,
    },
    /// A note row carried an unknown pyramid position.
    #[error("fragrance {fragrance} has an invalid note position: {source}")]
    InvalidPosition {
        /// Fragrance whose note failed to parse.
        fragrance: FragranceId,
        /// Parse failure.
        #[source]
        source: NotePositionParseError,
    },
    /// The stored tags did not form a valid fragrance.
    #[error("fragrance {fragrance} is malformed: {source}")]
    InvalidFragrance {
        /// Fragrance that failed validation.
        fragrance: FragranceId,
        /// Validation failure.
        #[source]
        source: FragranceError,
    },
    /// An evaluation carried a star value outside `1..=5`.
    #[error("rating of fragrance {fragrance} is invalid: {source}")]
    InvalidRating {
        /// Fragrance the rating refers to.
        fragrance: FragranceId,
        /// Validation failure.
        #[source]
        source: RatingError,
    },
    /// Another thread panicked while holding the connection.
    #[error("catalogue connection lock was poisoned")]
    Poisoned,
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only catalogue backed by a SQLite database.
pub struct SqliteCatalogue {
    path: PathBuf,
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteCatalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogue")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteCatalogue {
    /// Open a catalogue database read-only and check its tables.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogueError`] when the file cannot be opened or a
    /// required table is absent.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteCatalogueError>
    where
        P: AsRef<Path>,
    {
        let path = database_path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCatalogueError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        ensure_tables_exist(&connection)?;
        debug!("opened fragrance catalogue at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            connection: Mutex::new(connection),
        })
    }

    fn with_connection<T>(
        &self,
        operation: &'static str,
        read: impl FnOnce(&Connection) -> Result<T, SqliteCatalogueError>,
    ) -> Result<T, SourceError> {
        let guard = self
            .connection
            .lock()
            .map_err(|_| backend(operation, SqliteCatalogueError::Poisoned))?;
        read(&guard).map_err(|err| backend(operation, err))
    }
}

fn backend(operation: &'static str, err: SqliteCatalogueError) -> SourceError {
    SourceError::Backend {
        operation,
        source: Box::new(err),
    }
}

impl RatingSource for SqliteCatalogue {
    fn ratings_for(&self, reviewer: &ReviewerId) -> Result<Vec<RatingEvent>, SourceError> {
        let rows = self.with_connection("read evaluations", |connection| {
            load_ratings(connection, reviewer)
        })?;

        let mut resolved: HashMap<FragranceId, Fragrance> = HashMap::new();
        for (fragrance_id, _) in &rows {
            if resolved.contains_key(fragrance_id) {
                continue;
            }
            let loaded = self
                .with_connection("read rated fragrance", |connection| {
                    load_fragrance(connection, fragrance_id)
                })?
                .ok_or_else(|| SourceError::MissingFragrance(fragrance_id.clone()))?;
            resolved.insert(fragrance_id.clone(), loaded);
        }

        let events: Vec<RatingEvent> = rows
            .into_iter()
            .filter_map(|(fragrance_id, rating)| {
                resolved
                    .get(&fragrance_id)
                    .map(|fragrance| RatingEvent::new(fragrance.clone(), rating))
            })
            .collect();
        debug!(
            "loaded {} rating events for reviewer {reviewer}",
            events.len()
        );
        Ok(events)
    }
}

impl FragranceSource for SqliteCatalogue {
    fn fragrance(&self, id: &FragranceId) -> Result<Option<Fragrance>, SourceError> {
        self.with_connection("read fragrance", |connection| {
            load_fragrance(connection, id)
        })
    }
}

impl CandidateSource for SqliteCatalogue {
    fn candidates_for(
        &self,
        reviewer: &ReviewerId,
        policy: CandidatePolicy,
    ) -> Result<Vec<Fragrance>, SourceError> {
        self.with_connection("read candidate fragrances", |connection| {
            let ids = load_candidate_ids(connection, reviewer, policy)?;
            let mut fragrances = Vec::with_capacity(ids.len());
            for id in ids {
                if let Some(fragrance) = load_fragrance(connection, &id)? {
                    fragrances.push(fragrance);
                }
            }
            Ok(fragrances)
        })
    }
}

fn ensure_tables_exist(connection: &Connection) -> Result<(), SqliteCatalogueError> {
    let mut statement =
        connection.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in REQUIRED_TABLES {
        let present = statement
            .query_row([table], |_| Ok(()))
            .optional()?
            .is_some();
        if !present {
            return Err(SqliteCatalogueError::MissingTable { table });
        }
    }
    Ok(())
}

fn load_ratings(
    connection: &Connection,
    reviewer: &ReviewerId,
) -> Result<Vec<(FragranceId, Rating)>, SqliteCatalogueError> {
    let mut statement = connection.prepare_cached(RATINGS_SQL)?;
    let mut rows = statement.query([reviewer.as_str()])?;
    let mut ratings = Vec::new();
    while let Some(row) = rows.next()? {
        let fragrance = FragranceId::new(row.get::<_, String>(0)?);
        let stars: i64 = row.get(1)?;
        let rating = Rating::try_from(stars).map_err(|source| {
            SqliteCatalogueError::InvalidRating {
                fragrance: fragrance.clone(),
                source,
            }
        })?;
        ratings.push((fragrance, rating));
    }
    Ok(ratings)
}

fn load_candidate_ids(
    connection: &Connection,
    reviewer: &ReviewerId,
    policy: CandidatePolicy,
) -> Result<Vec<FragranceId>, SqliteCatalogueError> {
    let ids = match policy {
        CandidatePolicy::ExcludeRated => {
            let mut statement = connection.prepare_cached(UNRATED_IDS_SQL)?;
            statement
                .query_map([reviewer.as_str()], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?
        }
        CandidatePolicy::IncludeRated => {
            let mut statement = connection.prepare_cached(ALL_IDS_SQL)?;
            statement
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(ids.into_iter().map(FragranceId::new).collect())
}

fn load_fragrance(
    connection: &Connection,
    id: &FragranceId,
) -> Result<Option<Fragrance>, SqliteCatalogueError> {
    let header = connection
        .prepare_cached(FRAGRANCE_SQL)?
        .query_row([id.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .optional()?;
    let Some((name, brand, family_name, subfamily_name)) = header else {
        return Ok(None);
    };

    let classification = |source| SqliteCatalogueError::InvalidClassification {
        fragrance: id.clone(),
        source,
    };
    let family: Family = family_name.parse().map_err(classification)?;
    let subfamily: Subfamily = subfamily_name.parse().map_err(classification)?;

    let mut builder = Fragrance::builder(id.clone(), family, subfamily)
        .name(name)
        .brand(brand);

    let mut notes = connection.prepare_cached(NOTES_SQL)?;
    let mut note_rows = notes.query([id.as_str()])?;
    while let Some(row) = note_rows.next()? {
        let note = Note::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?);
        let position: NotePosition = row.get::<_, String>(2)?.parse().map_err(|source| {
            SqliteCatalogueError::InvalidPosition {
                fragrance: id.clone(),
                source,
            }
        })?;
        builder = builder.note(note, position);
    }

    let mut accords = connection.prepare_cached(ACCORDS_SQL)?;
    let mut accord_rows = accords.query([id.as_str()])?;
    while let Some(row) = accord_rows.next()? {
        builder = builder.accord(row.get::<_, String>(0)?, row.get::<_, f64>(1)?);
    }

    builder
        .build()
        .map(Some)
        .map_err(|source| SqliteCatalogueError::InvalidFragrance {
            fragrance: id.clone(),
            source,
        })
}
