//! Recommend command implementation for the Sillage CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sillage_scorer::{DEFAULT_LIMIT, RecommendOptions, Recommendation};

use crate::catalogue::{CatalogueQuery, QueryEnv, emit_json};
use crate::{
    ARG_DATABASE, ARG_INCLUDE_RATED, ARG_LIMIT, ARG_OUTPUT, ARG_REVIEWER, CliError,
    ENV_RECOMMEND_DATABASE, ENV_RECOMMEND_REVIEWER,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Build the reviewer's preference profile from their ratings \
                 in the catalogue, score every candidate fragrance and print \
                 the best matches as JSON. Fragrances containing a strongly \
                 disliked note are ranked last with a veto reason.",
    about = "Recommend fragrances for a reviewer"
)]
#[ortho_config(prefix = "SILLAGE")]
pub(crate) struct RecommendArgs {
    /// Path to the SQLite fragrance catalogue.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Reviewer whose ratings build the profile.
    #[arg(long = ARG_REVIEWER, value_name = "id")]
    #[serde(default)]
    pub(crate) reviewer: Option<String>,
    /// Maximum number of recommendations (1 to 50, default 10).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Also consider fragrances the reviewer has already rated.
    #[arg(
        long = ARG_INCLUDE_RATED,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) include_rated: Option<bool>,
    /// Write the JSON to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) query: CatalogueQuery,
    pub(crate) options: RecommendOptions,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let query = CatalogueQuery::from_options(
            args.database,
            args.reviewer,
            QueryEnv {
                database: ENV_RECOMMEND_DATABASE,
                reviewer: ENV_RECOMMEND_REVIEWER,
            },
        )?;
        let options = RecommendOptions {
            limit: args.limit.unwrap_or(DEFAULT_LIMIT),
            exclude_rated: !args.include_rated.unwrap_or(false),
        };
        Ok(Self {
            query,
            options,
            output: args.output,
        })
    }
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let recommendations = execute_recommend(&config)?;
    emit_json(&recommendations, config.output.as_deref(), stdout)
}

pub(super) fn execute_recommend(
    config: &RecommendConfig,
) -> Result<Vec<Recommendation>, CliError> {
    let recommender = config.query.open_recommender()?;
    let recommendations = recommender.recommend(&config.query.reviewer, config.options)?;
    info!(
        "recommended {} fragrances for {}",
        recommendations.len(),
        config.query.reviewer
    );
    Ok(recommendations)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
