//! Rank command implementation for the Voltside CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use voltside_core::{CatalogSource, PlanCatalog, RankOutcome, VehicleCatalog};
use voltside_data::CsvCatalogSource;
use voltside_fs::{ensure_parent_dir, open_utf8_file};
use voltside_scorer::{RankRequest, rank_request};

use crate::{
    ARG_RANK_OUTPUT, ARG_RANK_PLACES, ARG_RANK_REQUEST, ARG_RANK_STATIONS, CliError,
    ENV_RANK_PLACES, ENV_RANK_REQUEST, ENV_RANK_STATIONS,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the charging stations of a catalog for one trip. The \
                 catalog is given as two CSV files (stations and places); \
                 the request itself is provided as a JSON-encoded \
                 RankRequest. The outcome is written as JSON to --output or \
                 to standard output.",
    about = "Rank charging stations for a trip request"
)]
#[ortho_config(prefix = "VOLTSIDE")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing a RankRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the station catalog CSV.
    #[arg(long = ARG_RANK_STATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) stations: Option<Utf8PathBuf>,
    /// Path to the place-of-interest CSV.
    #[arg(long = ARG_RANK_PLACES, value_name = "path")]
    #[serde(default)]
    pub(crate) places: Option<Utf8PathBuf>,
    /// Write the JSON outcome here instead of standard output.
    #[arg(long = ARG_RANK_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the station catalog CSV.
    pub(crate) stations: Utf8PathBuf,
    /// Path to the place-of-interest CSV.
    pub(crate) places: Utf8PathBuf,
    /// Optional output path; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_RANK_REQUEST)?;
        Self::require_existing(&self.stations, ARG_RANK_STATIONS)?;
        Self::require_existing(&self.places, ARG_RANK_PLACES)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match voltside_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_REQUEST,
            env: ENV_RANK_REQUEST,
        })?;
        let stations = args.stations.ok_or(CliError::MissingArgument {
            field: ARG_RANK_STATIONS,
            env: ENV_RANK_STATIONS,
        })?;
        let places = args.places.ok_or(CliError::MissingArgument {
            field: ARG_RANK_PLACES,
            env: ENV_RANK_PLACES,
        })?;
        Ok(Self {
            request_path,
            stations,
            places,
            output: args.output,
        })
    }
}

/// Execute the `rank` subcommand.
pub(crate) fn run(args: RankArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;

    let request = read_request(&config.request_path)?;
    let source = CsvCatalogSource::new(config.stations.clone(), config.places.clone());
    let snapshot = source.load()?;
    log::info!(
        "ranking for '{}' over {} stations",
        request.trip.title(),
        snapshot.stations().len()
    );

    let outcome = rank_request(
        &snapshot,
        &request,
        &VehicleCatalog::builtin(),
        &PlanCatalog::builtin(),
    )?;
    write_outcome(&outcome, config.output.as_deref())
}

/// Read and validate the JSON request file.
pub(crate) fn read_request(path: &Utf8Path) -> Result<RankRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRankRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let request: RankRequest =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseRankRequest {
                path: path.to_path_buf(),
                source,
            }
        })?;
    request
        .trip
        .validate()
        .map_err(|source| CliError::InvalidRankRequest {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(request)
}

fn write_outcome(outcome: &RankOutcome, output: Option<&Utf8Path>) -> Result<(), CliError> {
    let mut json = serde_json::to_vec_pretty(outcome).map_err(CliError::SerializeOutcome)?;
    json.push(b'\n');
    match output {
        Some(path) => {
            ensure_parent_dir(path).map_err(CliError::WriteOutput)?;
            std::fs::write(path.as_std_path(), json).map_err(CliError::WriteOutput)
        }
        None => std::io::stdout()
            .write_all(&json)
            .map_err(CliError::WriteOutput),
    }
}
