//! Parsing of the wide station table.
//!
//! The expected shape mirrors the prototype's `Daten_Ladestationen.csv`:
//! fixed descriptive columns followed by the dense travel columns
//! `distanz_<ort>` / `dauer_<ort>` for every place and
//! `distanz_<start>_<ziel>` / `dauer_<start>_<ziel>` for every ordered place
//! pair. Travel columns are resolved against the loaded place directory up
//! front; a `distanz_`/`dauer_` column that matches no place is a
//! configuration error rather than a silently ignored cell.

use std::collections::BTreeMap;
use std::io::Read;
use std::str::FromStr;

use geo::Coord;

use voltside_core::{Leg, PlaceDirectory, PowerType, StationRecord, StationStatus};

use crate::error::IngestError;
use crate::places::{cell, parse_f64, require_column};

const DISTANCE_PREFIX: &str = "distanz_";
const DURATION_PREFIX: &str = "dauer_";

const FIXED_COLUMNS: [&str; 11] = [
    "location_id",
    "station_id",
    "lon",
    "lat",
    "operator",
    "address",
    "plug",
    "network",
    "power_kw",
    "power_type",
    "status",
];

/// What a travel column refers to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum TravelTarget {
    /// Leg from a single place to the station.
    Single(String),
    /// Via-station route for an ordered place pair.
    Pair(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TravelKind {
    Distance,
    Duration,
}

#[derive(Debug, Clone)]
struct TravelColumn {
    idx: usize,
    name: String,
    kind: TravelKind,
    target: TravelTarget,
}

/// Read station records from CSV data, resolving travel columns against the
/// given place directory.
///
/// # Errors
/// Returns [`IngestError`] for missing or unrecognised columns and
/// unparsable cells.
pub fn from_reader<R: Read>(
    reader: R,
    places: &PlaceDirectory,
) -> Result<Vec<StationRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let fixed: BTreeMap<&str, usize> = FIXED_COLUMNS
        .into_iter()
        .map(|column| Ok((column, require_column(&headers, column)?)))
        .collect::<Result<_, IngestError>>()?;
    let travel = classify_travel_columns(&headers, places)?;

    let mut stations = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        stations.push(parse_row(&record, &fixed, &travel)?);
    }
    log::debug!("loaded {} station records", stations.len());
    Ok(stations)
}

/// Resolve every `distanz_`/`dauer_` header against the place directory and
/// check that each target has both a distance and a duration column.
fn classify_travel_columns(
    headers: &csv::StringRecord,
    places: &PlaceDirectory,
) -> Result<Vec<TravelColumn>, IngestError> {
    let mut columns = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        let (kind, rest) = if let Some(rest) = header.strip_prefix(DISTANCE_PREFIX) {
            (TravelKind::Distance, rest)
        } else if let Some(rest) = header.strip_prefix(DURATION_PREFIX) {
            (TravelKind::Duration, rest)
        } else {
            continue;
        };
        let target = resolve_target(rest, places).ok_or_else(|| {
            IngestError::UnrecognisedTravelColumn {
                column: header.to_owned(),
            }
        })?;
        columns.push(TravelColumn {
            idx,
            name: header.to_owned(),
            kind,
            target,
        });
    }

    for column in &columns {
        let counterpart_kind = match column.kind {
            TravelKind::Distance => TravelKind::Duration,
            TravelKind::Duration => TravelKind::Distance,
        };
        let has_counterpart = columns
            .iter()
            .any(|other| other.kind == counterpart_kind && other.target == column.target);
        if !has_counterpart {
            return Err(IngestError::UnpairedTravelColumn {
                column: column.name.clone(),
                missing: counterpart_name(counterpart_kind, &column.target),
            });
        }
    }
    Ok(columns)
}

/// Match the suffix of a travel column against the known places: either one
/// place name, or `<from>_<to>` for two place names.
fn resolve_target(rest: &str, places: &PlaceDirectory) -> Option<TravelTarget> {
    if places.contains(rest) {
        return Some(TravelTarget::Single(rest.to_owned()));
    }
    for from in places.names() {
        let Some(remainder) = rest.strip_prefix(from) else {
            continue;
        };
        let Some(to) = remainder.strip_prefix('_') else {
            continue;
        };
        if places.contains(to) {
            return Some(TravelTarget::Pair(from.to_owned(), to.to_owned()));
        }
    }
    None
}

fn counterpart_name(kind: TravelKind, target: &TravelTarget) -> String {
    let prefix = match kind {
        TravelKind::Distance => DISTANCE_PREFIX,
        TravelKind::Duration => DURATION_PREFIX,
    };
    match target {
        TravelTarget::Single(place) => format!("{prefix}{place}"),
        TravelTarget::Pair(from, to) => format!("{prefix}{from}_{to}"),
    }
}

fn fixed_cell<'r>(
    record: &'r csv::StringRecord,
    fixed: &BTreeMap<&str, usize>,
    column: &str,
    line: u64,
) -> Result<&'r str, IngestError> {
    let idx = fixed
        .get(column)
        .copied()
        .ok_or_else(|| IngestError::MissingColumn {
            column: column.to_owned(),
        })?;
    cell(record, idx, column, line)
}

fn parse_row(
    record: &csv::StringRecord,
    fixed: &BTreeMap<&str, usize>,
    travel: &[TravelColumn],
) -> Result<StationRecord, IngestError> {
    let line = record.position().map_or(0, csv::Position::line);
    let text = |column: &str| fixed_cell(record, fixed, column, line);

    let lon = parse_f64(text("lon")?, "lon", line)?;
    let lat = parse_f64(text("lat")?, "lat", line)?;
    let power_kw = parse_f64(text("power_kw")?, "power_kw", line)?;
    let power_type = PowerType::from_str(text("power_type")?).map_err(|message| {
        IngestError::InvalidValue {
            column: "power_type".to_owned(),
            line,
            message,
        }
    })?;
    let status =
        StationStatus::from_str(text("status")?).map_err(|message| IngestError::InvalidValue {
            column: "status".to_owned(),
            line,
            message,
        })?;

    let mut distances: BTreeMap<TravelTarget, f64> = BTreeMap::new();
    let mut durations: BTreeMap<TravelTarget, f64> = BTreeMap::new();
    for column in travel {
        let value = parse_f64(cell(record, column.idx, &column.name, line)?, &column.name, line)?;
        match column.kind {
            TravelKind::Distance => distances.insert(column.target.clone(), value),
            TravelKind::Duration => durations.insert(column.target.clone(), value),
        };
    }

    let mut from_place = BTreeMap::new();
    let mut via_pair = BTreeMap::new();
    for (target, distance_m) in distances {
        // The header check guarantees a duration for every distance target.
        let duration_min = durations.get(&target).copied().unwrap_or_default();
        match target {
            TravelTarget::Single(place) => {
                from_place.insert(place, Leg::new(distance_m, duration_min));
            }
            TravelTarget::Pair(from, to) => {
                via_pair.insert(
                    voltside_core::PlacePair::new(from, to),
                    Leg::new(distance_m, duration_min),
                );
            }
        }
    }

    Ok(StationRecord {
        location_id: text("location_id")?.to_owned(),
        station_id: text("station_id")?.to_owned(),
        position: Coord { x: lon, y: lat },
        operator: text("operator")?.to_owned(),
        address: text("address")?.to_owned(),
        plug: text("plug")?.to_owned(),
        network: text("network")?.to_owned(),
        power_kw,
        power_type,
        status,
        from_place,
        via_pair,
    })
}
