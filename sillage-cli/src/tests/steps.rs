//! Behaviour-driven step definitions driving the CLI scenarios.

use super::helpers::{CatalogueFixture, NEWCOMER, SEASONED};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use sillage_scorer::RecommendError;
use std::cell::RefCell;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CliWorld {
    catalogue: CatalogueFixture,
    include_database: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        Self {
            catalogue: CatalogueFixture::new(),
            include_database: RefCell::new(true),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn invoke(&self, subcommand: &str, extra: &[&str]) {
        let mut argv = vec!["sillage".to_owned(), subcommand.to_owned()];
        if *self.include_database.borrow() {
            argv.extend([
                format!("--{ARG_DATABASE}"),
                self.catalogue.database().as_str().to_owned(),
            ]);
        }
        argv.extend(extra.iter().map(|arg| (*arg).to_owned()));
        let outcome = Cli::try_parse_from(argv)
            .map_err(CliError::from)
            .and_then(|cli| dispatch(cli.command, &mut *self.stdout.borrow_mut()));
        self.result.replace(Some(outcome));
    }

    fn json(&self) -> Value {
        let borrowed = self.result.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect("expected success");
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should be JSON")
    }

    fn error_exit_code(&self) -> u8 {
        let borrowed = self.result.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error")
            .exit_code()
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("a catalogue where ada has rated four fragrances")]
fn catalogue_exists(#[from(world)] world: &CliWorld) {
    assert!(
        world.catalogue.database().exists(),
        "expected the catalogue database on disk"
    );
}

#[given("I omit the database path")]
fn omit_database(#[from(world)] world: &CliWorld) {
    *world.include_database.borrow_mut() = false;
}

#[when("I run the recommend command for ada")]
fn recommend_for_ada(#[from(world)] world: &CliWorld) {
    world.invoke("recommend", &["--reviewer", SEASONED]);
}

#[when("I run the recommend command for the newcomer")]
fn recommend_for_newcomer(#[from(world)] world: &CliWorld) {
    world.invoke("recommend", &["--reviewer", NEWCOMER]);
}

#[when("I run the match command for ada and \"sour\"")]
fn match_sour_for_ada(#[from(world)] world: &CliWorld) {
    world.invoke("match", &["--reviewer", SEASONED, "--fragrance", "sour"]);
}

#[then("the command succeeds and lists \"bright\" first")]
fn lists_bright_first(#[from(world)] world: &CliWorld) {
    let json = world.json();
    let first = json.get(0).expect("at least one recommendation");
    assert_eq!(first["fragrance_id"], "bright");
    assert_eq!(first["veto"], Value::Null);
}

#[then("the \"sour\" fragrance is listed last with a veto reason")]
fn sour_listed_last(#[from(world)] world: &CliWorld) {
    let json = world.json();
    let last = json
        .as_array()
        .and_then(|picks| picks.last())
        .expect("recommendations array");
    assert_eq!(last["fragrance_id"], "sour");
    assert_eq!(last["veto_reason"], "Contains lemon which you dislike");
    assert_eq!(last["score"], 0.1);
}

#[then("the command fails with the insufficient data exit status")]
fn fails_with_insufficient_data(#[from(world)] world: &CliWorld) {
    assert_eq!(world.error_exit_code(), EXIT_INSUFFICIENT_DATA);
    let borrowed = world.result.borrow();
    match borrowed.as_ref().and_then(|outcome| outcome.as_ref().err()) {
        Some(CliError::Recommend(RecommendError::InsufficientData { found, .. })) => {
            assert_eq!(*found, 2);
        }
        other => panic!("expected InsufficientData, found {other:?}"),
    }
}

#[then("the CLI reports that the \"database\" flag is missing")]
fn reports_missing_database(#[from(world)] world: &CliWorld) {
    assert_eq!(world.error_exit_code(), EXIT_FAILURE);
    let borrowed = world.result.borrow();
    match borrowed.as_ref().and_then(|outcome| outcome.as_ref().err()) {
        Some(CliError::MissingArgument { field, env }) => {
            assert_eq!(*field, ARG_DATABASE);
            assert_eq!(*env, ENV_RECOMMEND_DATABASE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command prints a vetoed match scoring 10 percent")]
fn prints_vetoed_match(#[from(world)] world: &CliWorld) {
    let json = world.json();
    assert_eq!(json["fragrance_id"], "sour");
    assert_eq!(json["score_percent"], 10);
    assert_eq!(json["veto"]["note"], "lemon");
}

macro_rules! register_cli_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_cli_scenario!(recommend_happy_path, "recommending fragrances from a catalogue");
register_cli_scenario!(
    recommend_short_history,
    "rejecting a reviewer with too little history"
);
register_cli_scenario!(recommend_missing_database, "rejecting a missing database flag");
register_cli_scenario!(match_single_fragrance, "matching a single disliked fragrance");
