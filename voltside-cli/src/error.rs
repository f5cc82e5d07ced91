//! Error types emitted by the Voltside CLI.
//!
//! Keep this error type reasonably small; many CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use voltside_core::TripContextError;
use voltside_data::IngestError;
use voltside_scorer::RankError;

/// Errors emitted by the Voltside CLI.
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
        /// The missing option.
        field: &'static str,
        /// Environment variable that could supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// The option the path came from.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// The option the path came from.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// The option the path came from.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Loading the catalog CSV files failed.
    #[error("failed to load the catalog: {0}")]
    LoadCatalog(#[from] IngestError),
    /// Opening the rank request file failed.
    #[error("failed to open rank request at {path:?}: {source}")]
    OpenRankRequest {
        /// Path of the request file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Rank request JSON could not be decoded.
    #[error("failed to parse rank request JSON at {path:?}: {source}")]
    ParseRankRequest {
        /// Path of the request file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The rank request payload failed validation.
    #[error("rank request in {path:?} failed validation: {source}")]
    InvalidRankRequest {
        /// Path of the request file.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: TripContextError,
    },
    /// The ranking pipeline rejected the request.
    #[error("ranking failed: {0}")]
    Rank(#[from] RankError),
    /// Serializing the rank outcome failed.
    #[error("failed to serialize rank outcome: {0}")]
    SerializeOutcome(#[source] serde_json::Error),
    /// Writing the rank output failed.
    #[error("failed to write rank output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
