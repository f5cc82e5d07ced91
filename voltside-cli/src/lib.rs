//! Command-line interface for the Voltside relevance engine.
//!
//! The `rank` subcommand loads the station and place CSV files, reads a JSON
//! ranking request, runs the pipeline, and writes the outcome as JSON to a
//! file or standard output. Paths can come from CLI flags, configuration
//! files, or environment variables.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod rank;

pub use error::CliError;

pub(crate) const ARG_RANK_REQUEST: &str = "request";
pub(crate) const ARG_RANK_STATIONS: &str = "stations";
pub(crate) const ARG_RANK_PLACES: &str = "places";
pub(crate) const ARG_RANK_OUTPUT: &str = "output";
pub(crate) const ENV_RANK_REQUEST: &str = "VOLTSIDE_CMDS_RANK_REQUEST_PATH";
pub(crate) const ENV_RANK_STATIONS: &str = "VOLTSIDE_CMDS_RANK_STATIONS";
pub(crate) const ENV_RANK_PLACES: &str = "VOLTSIDE_CMDS_RANK_PLACES";

/// Run the Voltside CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration loading, data
/// loading, or the ranking itself fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => rank::run(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "voltside",
    about = "Charging-station ranking for a trip, from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the stations of a catalog for one trip request.
    Rank(rank::RankArgs),
}
