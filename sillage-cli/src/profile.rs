//! Profile command: print a digest of a reviewer's preference profile.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sillage_scorer::ProfileSummary;

use crate::catalogue::{CatalogueQuery, QueryEnv, emit_json};
use crate::{
    ARG_DATABASE, ARG_OUTPUT, ARG_REVIEWER, CliError, ENV_PROFILE_DATABASE, ENV_PROFILE_REVIEWER,
};

/// CLI arguments for the `profile` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise the preference profile learned from a reviewer's \
                 ratings: the notes they like and dislike most, and their \
                 strongest accords, families and subfamilies.",
    about = "Summarise a reviewer's preference profile"
)]
#[ortho_config(prefix = "SILLAGE")]
pub(crate) struct ProfileArgs {
    /// Path to the SQLite fragrance catalogue.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Reviewer whose ratings build the profile.
    #[arg(long = ARG_REVIEWER, value_name = "id")]
    #[serde(default)]
    pub(crate) reviewer: Option<String>,
    /// Write the JSON to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

/// Resolved `profile` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProfileConfig {
    pub(crate) query: CatalogueQuery,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<ProfileArgs> for ProfileConfig {
    type Error = CliError;

    fn try_from(args: ProfileArgs) -> Result<Self, Self::Error> {
        let query = CatalogueQuery::from_options(
            args.database,
            args.reviewer,
            QueryEnv {
                database: ENV_PROFILE_DATABASE,
                reviewer: ENV_PROFILE_REVIEWER,
            },
        )?;
        Ok(Self {
            query,
            output: args.output,
        })
    }
}

pub(super) fn run_profile_with(args: ProfileArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = ProfileConfig::try_from(merged)?;
    let summary = execute_profile(&config)?;
    emit_json(&summary, config.output.as_deref(), stdout)
}

pub(super) fn execute_profile(config: &ProfileConfig) -> Result<ProfileSummary, CliError> {
    let recommender = config.query.open_recommender()?;
    Ok(recommender.profile_summary(&config.query.reviewer)?)
}
