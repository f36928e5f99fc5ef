//! Error types emitted by the Sillage CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use sillage_core::SqliteCatalogueError;
use sillage_scorer::RecommendError;
use thiserror::Error;

/// Exit status for a person whose rating history is too short.
pub const EXIT_INSUFFICIENT_DATA: u8 = 2;
/// Exit status for every other failure, including usage errors.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status after clap prints requested help or version text.
pub const EXIT_SUCCESS: u8 = 0;

/// Errors emitted by the Sillage CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that would also supply it.
        env: &'static str,
    },
    /// The catalogue path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// The catalogue path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// The catalogue path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite catalogue failed.
    #[error(transparent)]
    OpenCatalogue(#[from] SqliteCatalogueError),
    /// Recommendation, matching or summarising failed.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Requested help or version output exits 0, insufficient history 2 and
    /// everything else, usage errors included, 1.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ArgumentParsing(err) if !err.use_stderr() => EXIT_SUCCESS,
            Self::Recommend(err) if err.is_insufficient_data() => EXIT_INSUFFICIENT_DATA,
            _ => EXIT_FAILURE,
        }
    }
}
