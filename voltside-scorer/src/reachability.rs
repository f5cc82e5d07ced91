//! Reachability filtering: which stations the vehicle can include in the
//! trip under the chosen charging mode.
//!
//! A pure predicate over the snapshot rows. It never mutates source records
//! and makes no ordering guarantee over its output.

use voltside_core::{CatalogError, ChargingMode, StationRecord, TravelView, TripContext};

/// Fixed onward-range ceiling for en-route stops, in metres.
///
/// Deliberately vehicle-agnostic: a conservative cap on how far any model
/// can continue after a stop, not the requesting vehicle's real range.
const MAX_ONWARD_RANGE_M: f64 = 350_000.0;

/// Keep the stations reachable under the trip's charging mode.
///
/// # Errors
/// Returns [`CatalogError`] when a travel leg or direct distance is missing,
/// which validated snapshots rule out.
pub(crate) fn reachable<'a>(
    stations: &'a [StationRecord],
    view: &TravelView<'_>,
    trip: &TripContext,
) -> Result<Vec<&'a StationRecord>, CatalogError> {
    let range_m = trip.remaining_range_m();
    let detour_m = trip.detour_budget_m();
    let mut kept = Vec::new();
    for station in stations {
        if is_reachable(station, view, range_m, detour_m)? {
            kept.push(station);
        }
    }
    Ok(kept)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the en-route detour subtracts the direct baseline distance"
)]
fn is_reachable(
    station: &StationRecord,
    view: &TravelView<'_>,
    range_m: f64,
    detour_m: f64,
) -> Result<bool, CatalogError> {
    let from_start = view.start_leg(station)?.distance_m;
    match view.mode() {
        ChargingMode::NearStart => Ok(from_start <= range_m && from_start <= detour_m),
        ChargingMode::Destination => {
            let from_destination = destination_distance_m(station, view)?;
            Ok(from_start <= range_m && from_destination <= detour_m)
        }
        ChargingMode::EnRoute => {
            if from_start > range_m {
                return Ok(false);
            }
            let onward = destination_distance_m(station, view)?;
            if onward > MAX_ONWARD_RANGE_M {
                return Ok(false);
            }
            let via = via_distance_m(station, view)?;
            let direct = direct_distance_m(view)?;
            // The added detour may come out negative for a station on the
            // direct line; it is intentionally not clamped and then always
            // passes the budget check.
            Ok(via - direct <= detour_m)
        }
    }
}

fn destination_distance_m(
    station: &StationRecord,
    view: &TravelView<'_>,
) -> Result<f64, CatalogError> {
    view.destination_leg(station)?
        .map(|leg| leg.distance_m)
        .ok_or(CatalogError::MissingDestination { mode: view.mode() })
}

fn via_distance_m(station: &StationRecord, view: &TravelView<'_>) -> Result<f64, CatalogError> {
    view.via_leg(station)?
        .map(|leg| leg.distance_m)
        .ok_or(CatalogError::MissingDestination { mode: view.mode() })
}

fn direct_distance_m(view: &TravelView<'_>) -> Result<f64, CatalogError> {
    match (view.direct_distance_m(), view.destination()) {
        (Some(direct), _) => Ok(direct),
        (None, Some(to)) => Err(CatalogError::MissingDirectDistance {
            from: view.start().to_owned(),
            to: to.to_owned(),
        }),
        (None, None) => Err(CatalogError::MissingDestination { mode: view.mode() }),
    }
}
