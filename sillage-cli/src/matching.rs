//! Match command: score one fragrance against a reviewer's profile.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sillage_core::FragranceId;
use sillage_scorer::Recommendation;

use crate::catalogue::{CatalogueQuery, QueryEnv, emit_json};
use crate::{
    ARG_DATABASE, ARG_FRAGRANCE, ARG_OUTPUT, ARG_REVIEWER, CliError, ENV_MATCH_DATABASE,
    ENV_MATCH_FRAGRANCE, ENV_MATCH_REVIEWER,
};

/// CLI arguments for the `match` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a single catalogue fragrance, rated or not, against \
                 the reviewer's preference profile and print the match as \
                 JSON, including its component breakdown or veto reason.",
    about = "Score one fragrance for a reviewer"
)]
#[ortho_config(prefix = "SILLAGE")]
pub(crate) struct MatchArgs {
    /// Path to the SQLite fragrance catalogue.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Reviewer whose ratings build the profile.
    #[arg(long = ARG_REVIEWER, value_name = "id")]
    #[serde(default)]
    pub(crate) reviewer: Option<String>,
    /// Fragrance to score.
    #[arg(long = ARG_FRAGRANCE, value_name = "id")]
    #[serde(default)]
    pub(crate) fragrance: Option<String>,
    /// Write the JSON to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

/// Resolved `match` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchConfig {
    pub(crate) query: CatalogueQuery,
    pub(crate) fragrance: FragranceId,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<MatchArgs> for MatchConfig {
    type Error = CliError;

    fn try_from(args: MatchArgs) -> Result<Self, Self::Error> {
        let query = CatalogueQuery::from_options(
            args.database,
            args.reviewer,
            QueryEnv {
                database: ENV_MATCH_DATABASE,
                reviewer: ENV_MATCH_REVIEWER,
            },
        )?;
        let fragrance = args
            .fragrance
            .filter(|id| !id.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_FRAGRANCE,
                env: ENV_MATCH_FRAGRANCE,
            })?;
        Ok(Self {
            query,
            fragrance: FragranceId::from(fragrance),
            output: args.output,
        })
    }
}

pub(super) fn run_match_with(args: MatchArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = MatchConfig::try_from(merged)?;
    let recommendation = execute_match(&config)?;
    emit_json(&recommendation, config.output.as_deref(), stdout)
}

pub(super) fn execute_match(config: &MatchConfig) -> Result<Recommendation, CliError> {
    let recommender = config.query.open_recommender()?;
    let recommendation =
        recommender.match_fragrance(&config.query.reviewer, &config.fragrance)?;
    info!(
        "{} scores {} for {}",
        config.fragrance, recommendation.result.score_percent, config.query.reviewer
    );
    Ok(recommendation)
}
