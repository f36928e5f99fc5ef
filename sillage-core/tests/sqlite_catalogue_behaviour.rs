//! Behavioural tests for `SqliteCatalogue` using rstest-bdd.

use std::{cell::RefCell, path::PathBuf};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sillage_core::{
    CandidatePolicy, CandidateSource, Family, Fragrance, Note, NotePosition, RatingEvent,
    RatingSource, ReviewerId, SqliteCatalogue, SqliteCatalogueError, Subfamily,
    test_support::write_sqlite_catalogue,
};
use tempfile::TempDir;

/// Shared state for catalogue scenarios.
#[derive(Debug)]
struct CatalogueWorld {
    temp_dir: TempDir,
    path: RefCell<Option<PathBuf>>,
    catalogue: RefCell<Option<SqliteCatalogue>>,
    open_error: RefCell<Option<SqliteCatalogueError>>,
    events: RefCell<Vec<RatingEvent>>,
    candidates: RefCell<Vec<Fragrance>>,
}

#[fixture]
fn world() -> CatalogueWorld {
    CatalogueWorld {
        temp_dir: TempDir::new().expect("create temp dir"),
        path: RefCell::new(None),
        catalogue: RefCell::new(None),
        open_error: RefCell::new(None),
        events: RefCell::new(Vec::new()),
        candidates: RefCell::new(Vec::new()),
    }
}

fn fragrances() -> Vec<Fragrance> {
    vec![
        Fragrance::builder("neroli-day", Family::Fresh, Subfamily::Citrus)
            .name("Neroli Day")
            .brand("Maison Nord")
            .note(Note::new("neroli", "Neroli"), NotePosition::Top)
            .note(Note::new("bergamot", "Bergamot"), NotePosition::Top)
            .accord("citrus", 0.8)
            .build()
            .expect("valid fragrance"),
        Fragrance::builder("tar-smoke", Family::Woody, Subfamily::DryWoods)
            .name("Tar Smoke")
            .brand("Maison Nord")
            .note(Note::new("birch-tar", "Birch Tar"), NotePosition::Base)
            .accord("smoky", 1.0)
            .build()
            .expect("valid fragrance"),
        Fragrance::builder("iris-veil", Family::Floral, Subfamily::SoftFloral)
            .name("Iris Veil")
            .brand("Atelier Sud")
            .note(Note::new("iris", "Iris"), NotePosition::Heart)
            .build()
            .expect("valid fragrance"),
    ]
}

#[given("a catalogue with three fragrances and two ratings by ada")]
fn given_catalogue(world: &CatalogueWorld) {
    let path = world.temp_dir.path().join("catalogue.db");
    write_sqlite_catalogue(
        &path,
        &fragrances(),
        &[("ada", "neroli-day", 5), ("ada", "tar-smoke", 1), ("bo", "iris-veil", 3)],
    )
    .expect("persist catalogue");
    world.path.replace(Some(path));
}

#[given("an empty SQLite database")]
fn given_empty_database(world: &CatalogueWorld) {
    let path = world.temp_dir.path().join("empty.db");
    rusqlite::Connection::open(&path)
        .and_then(|connection| connection.execute_batch("CREATE TABLE unrelated (id TEXT);"))
        .expect("create empty database");
    world.path.replace(Some(path));
}

#[when("I open the catalogue")]
fn open_catalogue(world: &CatalogueWorld) {
    let path = world.path.borrow().clone().expect("database path recorded");
    match SqliteCatalogue::open(path) {
        Ok(catalogue) => {
            world.catalogue.replace(Some(catalogue));
        }
        Err(err) => {
            world.open_error.replace(Some(err));
        }
    }
}

#[when("I read the ratings for ada")]
fn read_ratings(world: &CatalogueWorld) {
    let holder = world.catalogue.borrow();
    let catalogue = holder.as_ref().expect("catalogue opened");
    let events = catalogue
        .ratings_for(&ReviewerId::from("ada"))
        .expect("read ratings");
    world.events.replace(events);
}

#[when("I list candidates for ada excluding rated fragrances")]
fn list_candidates(world: &CatalogueWorld) {
    let holder = world.catalogue.borrow();
    let catalogue = holder.as_ref().expect("catalogue opened");
    let candidates = catalogue
        .candidates_for(&ReviewerId::from("ada"), CandidatePolicy::ExcludeRated)
        .expect("list candidates");
    world.candidates.replace(candidates);
}

#[then("two rating events are returned with their tags resolved")]
fn assert_events(world: &CatalogueWorld) {
    let events = world.events.borrow();
    let summary: Vec<_> = events
        .iter()
        .map(|event| {
            (
                event.fragrance.id.as_str(),
                event.rating.stars(),
                event.fragrance.notes().len(),
            )
        })
        .collect();
    assert_eq!(summary, vec![("neroli-day", 5, 2), ("tar-smoke", 1, 1)]);
}

#[then("only the unrated fragrance is returned")]
fn assert_candidates(world: &CatalogueWorld) {
    let candidates = world.candidates.borrow();
    let ids: Vec<_> = candidates.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["iris-veil"]);
}

#[then("opening fails because the fragrances table is missing")]
fn assert_missing_table(world: &CatalogueWorld) {
    assert!(world.catalogue.borrow().is_none());
    let error = world.open_error.borrow();
    assert!(matches!(
        error.as_ref(),
        Some(SqliteCatalogueError::MissingTable {
            table: "fragrances"
        })
    ));
}

#[scenario(path = "tests/features/sqlite_catalogue.feature", index = 0)]
fn reads_rating_history(world: CatalogueWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_catalogue.feature", index = 1)]
fn lists_unrated_candidates(world: CatalogueWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_catalogue.feature", index = 2)]
fn rejects_foreign_database(world: CatalogueWorld) {
    let _ = world;
}
