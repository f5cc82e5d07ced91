//! Immutable catalog snapshots and travel-data schema validation.
//!
//! The snapshot is the explicit, validated replacement for the prototype's
//! module-level tables: it owns the station rows and the place directory,
//! checks the travel-data schema once at construction, and resolves the
//! travel basis for a request exactly once via [`CatalogSnapshot::travel_view`]
//! instead of discovering string-keyed columns ad hoc per lookup.

use thiserror::Error;

use crate::place::PlaceDirectory;
use crate::station::{Leg, StationRecord};
use crate::trip::{ChargingMode, TripContext};

/// Errors raised when a snapshot's travel data is structurally incomplete.
///
/// These are configuration errors in the sense of the catalog contract: the
/// data source promised travel columns for every place pair and failed to
/// deliver them. They abort the computation and are surfaced to the caller;
/// there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The place directory is empty; no trip can be expressed.
    #[error("catalog contains no places of interest")]
    NoPlaces,
    /// A station lacks the travel leg from a known place.
    #[error("station '{station_id}' has no travel leg from place '{place}'")]
    MissingPlaceLeg {
        /// Connector identifier.
        station_id: String,
        /// Place whose leg is missing.
        place: String,
    },
    /// A station lacks the via-station route leg for an ordered place pair.
    #[error("station '{station_id}' has no route leg for '{from}' → '{to}'")]
    MissingRouteLeg {
        /// Connector identifier.
        station_id: String,
        /// Route origin place.
        from: String,
        /// Route destination place.
        to: String,
    },
    /// A place lacks the direct distance to another place.
    #[error("place '{from}' has no direct distance to '{to}'")]
    MissingDirectDistance {
        /// Matrix row place.
        from: String,
        /// Matrix column place.
        to: String,
    },
    /// A trip referenced a place the catalog does not know.
    #[error("unknown place '{place}'")]
    UnknownPlace {
        /// The unknown place name.
        place: String,
    },
    /// A destination-bound mode reached the catalog without a destination.
    #[error("charging mode '{mode}' requires a destination place")]
    MissingDestination {
        /// The offending mode.
        mode: ChargingMode,
    },
}

/// Read-only source of catalog snapshots.
///
/// The seam between the engine and whatever materializes the station table;
/// implementations load from CSV files, fixtures, or anything else that can
/// produce a validated snapshot.
pub trait CatalogSource {
    /// Error type of the concrete source.
    type Error: std::error::Error;

    /// Materialize an immutable, validated snapshot.
    ///
    /// # Errors
    /// Returns the source's error when the data cannot be read or fails
    /// snapshot validation.
    fn load(&self) -> Result<CatalogSnapshot, Self::Error>;
}

/// Immutable snapshot of the station catalog and the place directory.
///
/// Constructed once per data load and shared read-only by every request;
/// concurrent requests never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    stations: Vec<StationRecord>,
    places: PlaceDirectory,
}

impl CatalogSnapshot {
    /// Validate the travel-data schema and construct a snapshot.
    ///
    /// Every station must carry a travel leg from every known place and a
    /// via-station route leg for every ordered place pair, and every place
    /// must record its direct distance to every other place.
    ///
    /// # Errors
    /// Returns the first [`CatalogError`] encountered; the snapshot is not
    /// usable in a partially validated state.
    pub fn new(
        stations: Vec<StationRecord>,
        places: PlaceDirectory,
    ) -> Result<Self, CatalogError> {
        if places.is_empty() {
            return Err(CatalogError::NoPlaces);
        }
        for station in &stations {
            for place in places.names() {
                if station.leg_from(place).is_none() {
                    return Err(CatalogError::MissingPlaceLeg {
                        station_id: station.station_id.clone(),
                        place: place.to_owned(),
                    });
                }
            }
            for from in places.names() {
                for to in places.names() {
                    if from != to && station.leg_via(from, to).is_none() {
                        return Err(CatalogError::MissingRouteLeg {
                            station_id: station.station_id.clone(),
                            from: from.to_owned(),
                            to: to.to_owned(),
                        });
                    }
                }
            }
        }
        for from in places.names() {
            for to in places.names() {
                if from != to && places.direct_distance_m(from, to).is_none() {
                    return Err(CatalogError::MissingDirectDistance {
                        from: from.to_owned(),
                        to: to.to_owned(),
                    });
                }
            }
        }
        Ok(Self { stations, places })
    }

    /// The station rows.
    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    /// The place directory.
    pub const fn places(&self) -> &PlaceDirectory {
        &self.places
    }

    /// Resolve the travel basis for a trip once, up front.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownPlace`] when the trip names a place the
    /// directory does not contain and [`CatalogError::MissingDestination`]
    /// when a destination-bound mode arrives without one.
    pub fn travel_view<'a>(&'a self, trip: &'a TripContext) -> Result<TravelView<'a>, CatalogError> {
        if !self.places.contains(&trip.start_place) {
            return Err(CatalogError::UnknownPlace {
                place: trip.start_place.clone(),
            });
        }
        let destination = match (&trip.destination_place, trip.mode.needs_destination()) {
            (Some(destination), _) => {
                if !self.places.contains(destination) {
                    return Err(CatalogError::UnknownPlace {
                        place: destination.clone(),
                    });
                }
                Some(destination.as_str())
            }
            (None, true) => {
                return Err(CatalogError::MissingDestination { mode: trip.mode });
            }
            (None, false) => None,
        };
        let direct_m = destination
            .and_then(|to| self.places.direct_distance_m(&trip.start_place, to));
        Ok(TravelView {
            mode: trip.mode,
            start: &trip.start_place,
            destination,
            direct_m,
        })
    }
}

/// Travel basis for one request, resolved against a validated snapshot.
///
/// Carries the mode's leg selection so the reachability filter, the metric
/// calculator, and the scorer all read the same distance and drive-time
/// basis for a given station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelView<'a> {
    mode: ChargingMode,
    start: &'a str,
    destination: Option<&'a str>,
    direct_m: Option<f64>,
}

impl<'a> TravelView<'a> {
    /// The charging mode the view was resolved for.
    pub const fn mode(&self) -> ChargingMode {
        self.mode
    }

    /// Start place name.
    pub const fn start(&self) -> &'a str {
        self.start
    }

    /// Destination place name, when the trip has one.
    pub const fn destination(&self) -> Option<&'a str> {
        self.destination
    }

    /// Direct start→destination distance in metres, when the trip has a
    /// destination.
    pub const fn direct_distance_m(&self) -> Option<f64> {
        self.direct_m
    }

    /// Travel leg from the start place to the station.
    ///
    /// # Errors
    /// Returns [`CatalogError::MissingPlaceLeg`] if the snapshot validation
    /// was bypassed and the leg is absent.
    pub fn start_leg<'s>(&self, station: &'s StationRecord) -> Result<&'s Leg, CatalogError> {
        station
            .leg_from(self.start)
            .ok_or_else(|| CatalogError::MissingPlaceLeg {
                station_id: station.station_id.clone(),
                place: self.start.to_owned(),
            })
    }

    /// Travel leg from the destination place to the station, when the trip
    /// has a destination.
    ///
    /// # Errors
    /// Returns [`CatalogError::MissingPlaceLeg`] when the leg is absent.
    pub fn destination_leg<'s>(
        &self,
        station: &'s StationRecord,
    ) -> Result<Option<&'s Leg>, CatalogError> {
        self.destination
            .map(|place| {
                station
                    .leg_from(place)
                    .ok_or_else(|| CatalogError::MissingPlaceLeg {
                        station_id: station.station_id.clone(),
                        place: place.to_owned(),
                    })
            })
            .transpose()
    }

    /// Via-station route leg start→station→destination, when the trip has a
    /// destination.
    ///
    /// # Errors
    /// Returns [`CatalogError::MissingRouteLeg`] when the leg is absent.
    pub fn via_leg<'s>(
        &self,
        station: &'s StationRecord,
    ) -> Result<Option<&'s Leg>, CatalogError> {
        self.destination
            .map(|to| {
                station
                    .leg_via(self.start, to)
                    .ok_or_else(|| CatalogError::MissingRouteLeg {
                        station_id: station.station_id.clone(),
                        from: self.start.to_owned(),
                        to: to.to_owned(),
                    })
            })
            .transpose()
    }

    /// The mode's metric basis leg: near-start trips use the start leg,
    /// destination trips the destination leg, en-route trips the via-station
    /// route leg.
    ///
    /// # Errors
    /// Propagates the leg lookup errors of the underlying accessors.
    pub fn basis_leg<'s>(&self, station: &'s StationRecord) -> Result<&'s Leg, CatalogError> {
        match self.mode {
            ChargingMode::NearStart => self.start_leg(station),
            ChargingMode::Destination => {
                self.destination_leg(station)?
                    .ok_or(CatalogError::MissingDestination { mode: self.mode })
            }
            ChargingMode::EnRoute => self
                .via_leg(station)?
                .ok_or(CatalogError::MissingDestination { mode: self.mode }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SnapshotBuilder, StationBuilder};

    #[test]
    fn rejects_an_empty_place_directory() {
        let result = CatalogSnapshot::new(Vec::new(), PlaceDirectory::default());
        assert_eq!(result, Err(CatalogError::NoPlaces));
    }

    #[test]
    fn rejects_a_station_without_a_place_leg() {
        let station = StationBuilder::new("loc-1", "st-1")
            .leg("Basel", 1000.0, 2.0)
            .via("Basel", "Bern", 95_000.0, 70.0)
            .via("Bern", "Basel", 95_000.0, 70.0)
            .build();
        let result = SnapshotBuilder::basel_bern().station_raw(station).build();
        assert_eq!(
            result,
            Err(CatalogError::MissingPlaceLeg {
                station_id: "st-1".to_owned(),
                place: "Bern".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_a_station_without_a_route_leg() {
        let station = StationBuilder::new("loc-1", "st-1")
            .leg("Basel", 1000.0, 2.0)
            .leg("Bern", 93_000.0, 68.0)
            .via("Basel", "Bern", 95_000.0, 70.0)
            .build();
        let result = SnapshotBuilder::basel_bern().station_raw(station).build();
        assert_eq!(
            result,
            Err(CatalogError::MissingRouteLeg {
                station_id: "st-1".to_owned(),
                from: "Bern".to_owned(),
                to: "Basel".to_owned(),
            })
        );
    }

    #[test]
    fn travel_view_rejects_unknown_places() {
        let snapshot = SnapshotBuilder::basel_bern().build().unwrap();
        let trip = TripContext::new("Zürich", None, ChargingMode::NearStart, 100.0, 10.0).unwrap();
        let result = snapshot.travel_view(&trip);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::UnknownPlace {
                place: "Zürich".to_owned()
            }
        );
    }

    #[test]
    fn travel_view_resolves_the_direct_distance() {
        let snapshot = SnapshotBuilder::basel_bern().build().unwrap();
        let trip = TripContext::new(
            "Basel",
            Some("Bern"),
            ChargingMode::EnRoute,
            120.0,
            10.0,
        )
        .unwrap();
        let view = snapshot.travel_view(&trip).unwrap();
        assert_eq!(view.direct_distance_m(), Some(94_000.0));
        assert_eq!(view.destination(), Some("Bern"));
    }

    #[test]
    fn basis_leg_follows_the_mode() {
        let snapshot = SnapshotBuilder::basel_bern()
            .station(
                StationBuilder::new("loc-1", "st-1")
                    .leg("Basel", 1000.0, 2.0)
                    .leg("Bern", 93_000.0, 68.0)
                    .via("Basel", "Bern", 95_000.0, 70.0)
                    .via("Bern", "Basel", 95_000.0, 70.0),
            )
            .build()
            .unwrap();
        let station = &snapshot.stations()[0];

        let near = TripContext::new("Basel", None, ChargingMode::NearStart, 100.0, 10.0).unwrap();
        let view = snapshot.travel_view(&near).unwrap();
        assert_eq!(view.basis_leg(station).unwrap().distance_m, 1000.0);

        let route = TripContext::new(
            "Basel",
            Some("Bern"),
            ChargingMode::EnRoute,
            120.0,
            10.0,
        )
        .unwrap();
        let view = snapshot.travel_view(&route).unwrap();
        assert_eq!(view.basis_leg(station).unwrap().distance_m, 95_000.0);

        let dest = TripContext::new(
            "Basel",
            Some("Bern"),
            ChargingMode::Destination,
            120.0,
            10.0,
        )
        .unwrap();
        let view = snapshot.travel_view(&dest).unwrap();
        assert_eq!(view.basis_leg(station).unwrap().distance_m, 93_000.0);
    }
}
