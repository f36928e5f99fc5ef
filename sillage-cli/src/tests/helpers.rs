//! Test helpers that write a small SQLite catalogue to a temporary directory.

use camino::{Utf8Path, Utf8PathBuf};
use sillage_core::test_support::{fragrance_with_notes, write_sqlite_catalogue};
use tempfile::TempDir;

/// Reviewer with enough history for recommendations.
pub(super) const SEASONED: &str = "ada";
/// Reviewer with two ratings, one short of the minimum.
pub(super) const NEWCOMER: &str = "newcomer";

/// A catalogue on disk.
///
/// `ada` loved bergamot and grapefruit and twice disliked lemon, which puts
/// lemon past the veto threshold. The unrated candidates are `bright`
/// (bergamot and grapefruit), `plain` (musk only) and `sour` (lemon and
/// bergamot).
#[derive(Debug)]
pub(super) struct CatalogueFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
    database: Utf8PathBuf,
}

impl CatalogueFixture {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let database = root.join("catalogue.db");
        let fragrances = [
            fragrance_with_notes("sun", &["bergamot"]),
            fragrance_with_notes("grove", &["grapefruit"]),
            fragrance_with_notes("zest", &["lemon"]),
            fragrance_with_notes("peel", &["lemon"]),
            fragrance_with_notes("bright", &["bergamot", "grapefruit"]),
            fragrance_with_notes("plain", &["musk"]),
            fragrance_with_notes("sour", &["lemon", "bergamot"]),
        ];
        let ratings = [
            (SEASONED, "sun", 5),
            (SEASONED, "grove", 5),
            (SEASONED, "zest", 1),
            (SEASONED, "peel", 1),
            (NEWCOMER, "sun", 5),
            (NEWCOMER, "zest", 2),
        ];
        write_sqlite_catalogue(database.as_std_path(), &fragrances, &ratings)
            .expect("write catalogue");
        Self {
            _dir: dir,
            root,
            database,
        }
    }

    pub(super) fn database(&self) -> &Utf8Path {
        &self.database
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}
