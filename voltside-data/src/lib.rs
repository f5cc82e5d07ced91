//! CSV ingestion for the Voltside catalog.
//!
//! Materializes the immutable [`CatalogSnapshot`] the relevance engine works
//! on from two local CSV files: the wide station table and the
//! place-of-interest table with its pairwise direct-distance matrix. All
//! travel columns are resolved and validated at load time; the engine never
//! touches column names.

#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use voltside_core::{CatalogSnapshot, CatalogSource};
use voltside_fs::open_utf8_file;

mod error;
pub mod places;
pub mod stations;

pub use error::IngestError;

/// Catalog source backed by two CSV files.
///
/// # Examples
/// ```no_run
/// use camino::Utf8PathBuf;
/// use voltside_core::CatalogSource;
/// use voltside_data::CsvCatalogSource;
///
/// let source = CsvCatalogSource::new(
///     Utf8PathBuf::from("data/stations.csv"),
///     Utf8PathBuf::from("data/places.csv"),
/// );
/// let snapshot = source.load()?;
/// # Ok::<(), voltside_data::IngestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvCatalogSource {
    stations_path: Utf8PathBuf,
    places_path: Utf8PathBuf,
}

impl CsvCatalogSource {
    /// Create a source from the two file paths.
    pub const fn new(stations_path: Utf8PathBuf, places_path: Utf8PathBuf) -> Self {
        Self {
            stations_path,
            places_path,
        }
    }
}

impl CatalogSource for CsvCatalogSource {
    type Error = IngestError;

    fn load(&self) -> Result<CatalogSnapshot, Self::Error> {
        let places_file = open_utf8_file(&self.places_path).map_err(|source| {
            IngestError::Open {
                path: self.places_path.clone(),
                source,
            }
        })?;
        let directory = places::from_reader(places_file)?;

        let stations_file = open_utf8_file(&self.stations_path).map_err(|source| {
            IngestError::Open {
                path: self.stations_path.clone(),
                source,
            }
        })?;
        let stations = stations::from_reader(stations_file, &directory)?;

        log::info!(
            "catalog snapshot: {} stations, {} places",
            stations.len(),
            directory.len()
        );
        Ok(CatalogSnapshot::new(stations, directory)?)
    }
}
