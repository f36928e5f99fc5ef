//! Catalogue selection and JSON output shared by every subcommand.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use serde::Serialize;
use sillage_core::{ReviewerId, SqliteCatalogue};
use sillage_fs::InputPath;
use sillage_scorer::Recommender;

use crate::{ARG_DATABASE, CliError};

/// Which catalogue to read and whose ratings to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CatalogueQuery {
    /// SQLite catalogue database.
    pub(crate) database: Utf8PathBuf,
    /// Person whose ratings drive the profile.
    pub(crate) reviewer: ReviewerId,
}

impl CatalogueQuery {
    /// Build a query from merged options, naming the environment variables
    /// for whichever command is running when a value is missing.
    pub(crate) fn from_options(
        database: Option<Utf8PathBuf>,
        reviewer: Option<String>,
        envs: QueryEnv,
    ) -> Result<Self, CliError> {
        let database = database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: envs.database,
        })?;
        let reviewer = reviewer
            .filter(|id| !id.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: crate::ARG_REVIEWER,
                env: envs.reviewer,
            })?;
        Ok(Self {
            database,
            reviewer: ReviewerId::from(reviewer),
        })
    }

    /// Check the database path names an existing regular file.
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let field = ARG_DATABASE;
        let path = &self.database;
        match sillage_fs::inspect_input(path) {
            Ok(InputPath::File) => Ok(()),
            Ok(InputPath::NotFile) => Err(CliError::SourcePathNotFile {
                field,
                path: path.clone(),
            }),
            Ok(InputPath::Missing) => Err(CliError::MissingSourceFile {
                field,
                path: path.clone(),
            }),
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.clone(),
                source,
            }),
        }
    }

    /// Open the catalogue read-only and wrap it in a default recommender.
    pub(crate) fn open_recommender(&self) -> Result<Recommender<SqliteCatalogue>, CliError> {
        self.validate_sources()?;
        let catalogue = SqliteCatalogue::open(self.database.as_std_path())?;
        info!("opened catalogue {}", self.database);
        Ok(Recommender::new(catalogue))
    }
}

/// Environment variables that can supply the shared catalogue options.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueryEnv {
    pub(crate) database: &'static str,
    pub(crate) reviewer: &'static str,
}

/// Serialise `value` as pretty JSON to `output` when given, else to `stdout`.
pub(crate) fn emit_json<T: Serialize>(
    value: &T,
    output: Option<&Utf8Path>,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    match output {
        Some(path) => {
            let mut file =
                sillage_fs::create_output_file(path).map_err(|source| CliError::CreateOutput {
                    path: path.to_path_buf(),
                    source,
                })?;
            write_payload(&mut file, &payload)?;
            info!("wrote {path}");
            Ok(())
        }
        None => write_payload(stdout, &payload),
    }
}

fn write_payload(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    writer.flush().map_err(CliError::WriteOutput)
}
