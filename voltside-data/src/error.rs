//! Errors raised while materializing a catalog snapshot from CSV files.

use camino::Utf8PathBuf;
use thiserror::Error;

use voltside_core::CatalogError;

/// Errors returned by the CSV catalog loader.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Opening a source file failed.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path of the file that could not be opened.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading or decoding CSV data failed.
    #[error("failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),
    /// A required column is missing from the header row.
    #[error("missing required column '{column}'")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },
    /// A travel column has no counterpart, e.g. a `distanz_` column without
    /// the matching `dauer_` column.
    #[error("travel column '{column}' has no {missing} counterpart")]
    UnpairedTravelColumn {
        /// The column that was found.
        column: String,
        /// The counterpart that was not.
        missing: String,
    },
    /// A `distanz_`/`dauer_` column does not resolve to a known place or
    /// place pair.
    #[error("travel column '{column}' does not match any known place or place pair")]
    UnrecognisedTravelColumn {
        /// The offending column name.
        column: String,
    },
    /// A cell could not be parsed into the expected type.
    #[error("invalid value in column '{column}' on line {line}: {message}")]
    InvalidValue {
        /// Column of the offending cell.
        column: String,
        /// 1-based line number in the source file.
        line: u64,
        /// Parser message.
        message: String,
    },
    /// The parsed data failed catalog snapshot validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
