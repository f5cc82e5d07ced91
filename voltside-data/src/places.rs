//! Parsing of the place-of-interest table.
//!
//! The expected shape mirrors the prototype's `Positionen.csv`: one row per
//! place with `name`, `lon`, `lat`, followed by one column per place name
//! carrying the pairwise direct road distance in metres. The cell for a
//! place's own column is empty or zero.

use std::collections::BTreeMap;
use std::io::Read;

use geo::Coord;

use voltside_core::{Place, PlaceDirectory};

use crate::error::IngestError;

const COL_NAME: &str = "name";
const COL_LON: &str = "lon";
const COL_LAT: &str = "lat";

/// Read the place directory from CSV data.
///
/// # Errors
/// Returns [`IngestError`] when the header lacks a required column or a cell
/// fails to parse.
pub fn from_reader<R: Read>(reader: R) -> Result<PlaceDirectory, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let name_idx = require_column(&headers, COL_NAME)?;
    let lon_idx = require_column(&headers, COL_LON)?;
    let lat_idx = require_column(&headers, COL_LAT)?;
    let fixed = [name_idx, lon_idx, lat_idx];

    let mut places = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let name = cell(&record, name_idx, COL_NAME, line)?.to_owned();
        let lon = parse_f64(cell(&record, lon_idx, COL_LON, line)?, COL_LON, line)?;
        let lat = parse_f64(cell(&record, lat_idx, COL_LAT, line)?, COL_LAT, line)?;

        let mut direct_m = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if fixed.contains(&idx) || header == name {
                continue;
            }
            let value = cell(&record, idx, header, line)?;
            if value.trim().is_empty() {
                continue;
            }
            direct_m.insert(header.to_owned(), parse_f64(value, header, line)?);
        }
        places.push(Place::new(name, Coord { x: lon, y: lat }, direct_m));
    }
    log::debug!("loaded {} places of interest", places.len());
    Ok(PlaceDirectory::new(places))
}

pub(crate) fn require_column(headers: &csv::StringRecord, column: &str) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| IngestError::MissingColumn {
            column: column.to_owned(),
        })
}

pub(crate) fn cell<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<&'r str, IngestError> {
    record.get(idx).ok_or_else(|| IngestError::InvalidValue {
        column: column.to_owned(),
        line,
        message: "row is shorter than the header".to_owned(),
    })
}

pub(crate) fn parse_f64(value: &str, column: &str, line: u64) -> Result<f64, IngestError> {
    value
        .trim()
        .parse()
        .map_err(|err: std::num::ParseFloatError| IngestError::InvalidValue {
            column: column.to_owned(),
            line,
            message: err.to_string(),
        })
}
