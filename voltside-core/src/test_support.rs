//! Test-only builders for station records and catalog snapshots, used by
//! unit and behaviour tests across the workspace.

use std::collections::BTreeMap;

use geo::Coord;

use crate::catalog::{CatalogError, CatalogSnapshot};
use crate::place::{Place, PlaceDirectory};
use crate::station::{Leg, PlacePair, PowerType, StationRecord, StationStatus};

/// Fluent builder for a [`StationRecord`] with sensible defaults.
///
/// Defaults describe a free 50 kW DC CCS connector on the evpass network;
/// tests override only the fields they exercise.
#[derive(Debug, Clone)]
pub struct StationBuilder {
    record: StationRecord,
}

impl StationBuilder {
    /// Start a builder for the given location and connector identifiers.
    pub fn new(location_id: impl Into<String>, station_id: impl Into<String>) -> Self {
        Self {
            record: StationRecord {
                location_id: location_id.into(),
                station_id: station_id.into(),
                position: Coord { x: 7.59, y: 47.56 },
                operator: "Energie AG".to_owned(),
                address: "Teststrasse 1".to_owned(),
                plug: "CCS".to_owned(),
                network: "evpass".to_owned(),
                power_kw: 50.0,
                power_type: PowerType::Dc,
                status: StationStatus::Available,
                from_place: BTreeMap::new(),
                via_pair: BTreeMap::new(),
            },
        }
    }

    /// Override the WGS84 position.
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.record.position = Coord { x, y };
        self
    }

    /// Override the connector type.
    pub fn plug(mut self, plug: impl Into<String>) -> Self {
        self.record.plug = plug.into();
        self
    }

    /// Override the network tag.
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.record.network = network.into();
        self
    }

    /// Override the operator name.
    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.record.operator = operator.into();
        self
    }

    /// Override the rated power.
    pub fn power(mut self, power_kw: f64) -> Self {
        self.record.power_kw = power_kw;
        self
    }

    /// Override the electrical supply type.
    pub fn power_type(mut self, power_type: PowerType) -> Self {
        self.record.power_type = power_type;
        self
    }

    /// Override the availability status.
    pub fn status(mut self, status: StationStatus) -> Self {
        self.record.status = status;
        self
    }

    /// Add a travel leg from a place to the station.
    pub fn leg(mut self, place: impl Into<String>, distance_m: f64, duration_min: f64) -> Self {
        self.record
            .from_place
            .insert(place.into(), Leg::new(distance_m, duration_min));
        self
    }

    /// Add a via-station route leg for an ordered place pair.
    pub fn via(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        distance_m: f64,
        duration_min: f64,
    ) -> Self {
        self.record
            .via_pair
            .insert(PlacePair::new(from, to), Leg::new(distance_m, duration_min));
        self
    }

    /// Finish the record.
    pub fn build(self) -> StationRecord {
        self.record
    }
}

/// Builder assembling a validated [`CatalogSnapshot`] for tests.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    places: Vec<Place>,
    stations: Vec<StationRecord>,
}

impl SnapshotBuilder {
    /// Start with an empty place directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory with only Basel.
    pub fn basel() -> Self {
        Self::new().place("Basel", 7.59, 47.56, [])
    }

    /// A directory with Basel and Bern, 94 km apart in both directions.
    pub fn basel_bern() -> Self {
        Self::new()
            .place("Basel", 7.59, 47.56, [("Bern", 94_000.0)])
            .place("Bern", 7.45, 46.95, [("Basel", 94_000.0)])
    }

    /// Add a place with its direct-distance row.
    pub fn place<'a, I>(mut self, name: &str, x: f64, y: f64, direct: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let direct_m = direct
            .into_iter()
            .map(|(other, metres)| (other.to_owned(), metres))
            .collect();
        self.places.push(Place::new(name, Coord { x, y }, direct_m));
        self
    }

    /// Add a station from its builder.
    pub fn station(self, builder: StationBuilder) -> Self {
        self.station_raw(builder.build())
    }

    /// Add an already-built station record.
    pub fn station_raw(mut self, record: StationRecord) -> Self {
        self.stations.push(record);
        self
    }

    /// Validate and build the snapshot.
    ///
    /// # Errors
    /// Propagates [`CatalogError`] from snapshot validation so tests can
    /// assert on deliberately broken data.
    pub fn build(self) -> Result<CatalogSnapshot, CatalogError> {
        CatalogSnapshot::new(self.stations, PlaceDirectory::new(self.places))
    }
}
