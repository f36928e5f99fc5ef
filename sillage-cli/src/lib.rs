//! Command-line interface for scoring fragrances against a reviewer's
//! preference profile.
//!
//! Every subcommand reads a SQLite catalogue, builds the reviewer's profile
//! from their ratings and prints JSON. Options layer through `ortho_config`:
//! defaults, then configuration files, then `SILLAGE_*` environment
//! variables, then CLI flags.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod catalogue;
mod error;
mod matching;
mod profile;
mod recommend;

pub use error::{CliError, EXIT_FAILURE, EXIT_INSUFFICIENT_DATA, EXIT_SUCCESS};

use matching::{MatchArgs, run_match_with};
use profile::{ProfileArgs, run_profile_with};
use recommend::{RecommendArgs, run_recommend_with};

const ARG_DATABASE: &str = "database";
const ARG_REVIEWER: &str = "reviewer";
const ARG_FRAGRANCE: &str = "fragrance";
const ARG_LIMIT: &str = "limit";
const ARG_INCLUDE_RATED: &str = "include-rated";
const ARG_OUTPUT: &str = "output";
const ENV_RECOMMEND_DATABASE: &str = "SILLAGE_CMDS_RECOMMEND_DATABASE";
const ENV_RECOMMEND_REVIEWER: &str = "SILLAGE_CMDS_RECOMMEND_REVIEWER";
const ENV_PROFILE_DATABASE: &str = "SILLAGE_CMDS_PROFILE_DATABASE";
const ENV_PROFILE_REVIEWER: &str = "SILLAGE_CMDS_PROFILE_REVIEWER";
const ENV_MATCH_DATABASE: &str = "SILLAGE_CMDS_MATCH_DATABASE";
const ENV_MATCH_REVIEWER: &str = "SILLAGE_CMDS_MATCH_REVIEWER";
const ENV_MATCH_FRAGRANCE: &str = "SILLAGE_CMDS_MATCH_FRAGRANCE";

/// Run the Sillage CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when parsing, configuration, the catalogue or
/// scoring fails. [`CliError::exit_code`] gives the matching exit status.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, stdout: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Recommend(args) => run_recommend_with(args, stdout),
        Command::Profile(args) => run_profile_with(args, stdout),
        Command::Match(args) => run_match_with(args, stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sillage",
    about = "Fragrance recommendations from a reviewer's star ratings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank unrated fragrances by how well they match the reviewer.
    Recommend(RecommendArgs),
    /// Summarise the reviewer's learned preferences.
    Profile(ProfileArgs),
    /// Score a single fragrance for the reviewer.
    Match(MatchArgs),
}

#[cfg(test)]
mod tests;
