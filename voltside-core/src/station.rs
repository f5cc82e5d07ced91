//! Station catalog rows: one record per (physical location × connector).
//!
//! A record carries the connector's electrical characteristics, its
//! availability status, and the precomputed travel data to every known place
//! of interest. Coordinates are WGS84 with `x = longitude` and
//! `y = latitude`, matching the convention of the map consumer.

use std::collections::BTreeMap;

use geo::Coord;

/// Precomputed travel leg: road distance and drive time to one station.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Road distance in metres.
    pub distance_m: f64,
    /// Drive time in minutes.
    pub duration_min: f64,
}

impl Leg {
    /// Construct a leg from distance and drive time.
    pub fn new(distance_m: f64, duration_min: f64) -> Self {
        Self {
            distance_m,
            duration_min,
        }
    }
}

/// Ordered place pair identifying a start→destination route.
///
/// Keys the via-station route legs: the total distance of
/// `from → station → to` is stored per ordered pair, so `(Basel, Bern)` and
/// `(Bern, Basel)` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacePair {
    /// Route origin place name.
    pub from: String,
    /// Route destination place name.
    pub to: String,
}

impl PlacePair {
    /// Construct an ordered pair from origin and destination names.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Electrical supply type of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PowerType {
    /// Direct current fast charging.
    Dc,
    /// Three-phase alternating current.
    AcThreePhase,
    /// Single-phase alternating current.
    AcSinglePhase,
}

impl PowerType {
    /// Return the power type as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use voltside_core::PowerType;
    ///
    /// assert_eq!(PowerType::Dc.as_str(), "dc");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dc => "dc",
            Self::AcThreePhase => "ac_3_phase",
            Self::AcSinglePhase => "ac_1_phase",
        }
    }
}

impl std::fmt::Display for PowerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PowerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dc" => Ok(Self::Dc),
            "ac_3_phase" | "ac3" => Ok(Self::AcThreePhase),
            "ac_1_phase" | "ac1" => Ok(Self::AcSinglePhase),
            _ => Err(format!("unknown power type '{s}'")),
        }
    }
}

/// Live availability of a connector, as last reported by the status feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StationStatus {
    /// Free and ready to charge.
    Available,
    /// Currently in use.
    Occupied,
    /// No recent status report.
    Unknown,
    /// Out of service.
    OutOfService,
}

impl StationStatus {
    /// Return the status as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Unknown => "unknown",
            Self::OutOfService => "out_of_service",
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "unknown" => Ok(Self::Unknown),
            "out_of_service" | "outofservice" => Ok(Self::OutOfService),
            _ => Err(format!("unknown station status '{s}'")),
        }
    }
}

/// One catalog row: a single connector at a physical charging location.
///
/// Several records may share a `location_id`; those records describe the
/// connectors of one physical site and carry identical coordinates. The
/// travel maps are populated by the catalog source for every known place
/// and validated by [`CatalogSnapshot::new`](crate::CatalogSnapshot::new).
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// Identifier of the physical location; stable across its connectors.
    pub location_id: String,
    /// Identifier of this connector.
    pub station_id: String,
    /// WGS84 position, constant within a `location_id`.
    pub position: Coord<f64>,
    /// Operator name.
    pub operator: String,
    /// Street address.
    pub address: String,
    /// Connector type, e.g. `"CCS"` or `"Kabel Typ 2"`.
    pub plug: String,
    /// Charging network tag, e.g. `"evpass"`.
    pub network: String,
    /// Rated power in kW.
    pub power_kw: f64,
    /// Electrical supply type.
    pub power_type: PowerType,
    /// Live availability status.
    pub status: StationStatus,
    /// Travel leg from each known place to this station.
    pub from_place: BTreeMap<String, Leg>,
    /// Total route leg start→station→destination per ordered place pair.
    pub via_pair: BTreeMap<PlacePair, Leg>,
}

impl StationRecord {
    /// Travel leg from the named place, if the catalog carries it.
    pub fn leg_from(&self, place: &str) -> Option<&Leg> {
        self.from_place.get(place)
    }

    /// Via-station route leg for the ordered pair, if the catalog carries it.
    pub fn leg_via(&self, from: &str, to: &str) -> Option<&Leg> {
        self.via_pair.get(&PlacePair::new(from, to))
    }
}
