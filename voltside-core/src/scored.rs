//! Derived, per-request output types of the ranking pipeline.
//!
//! Everything in this module is ephemeral: built fresh from the snapshot for
//! one request, handed to the consumer, and discarded. Nothing here is ever
//! written back into the catalog.

use geo::Coord;

use crate::station::{PowerType, StationStatus};

/// Discrete display tier of a relevance score within its candidate set.
///
/// The five tiers map to the display weights `0`, `0.25`, `0.5`, `0.75`,
/// and `1.0` from lowest to highest band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelevanceCategory {
    /// Lowest quintile band.
    Lowest,
    /// Second band.
    Low,
    /// Middle band.
    Medium,
    /// Fourth band.
    High,
    /// Top band.
    Highest,
}

impl RelevanceCategory {
    /// Display weight of the band: `0`, `0.25`, `0.5`, `0.75`, or `1.0`.
    pub const fn display_weight(self) -> f64 {
        match self {
            Self::Lowest => 0.0,
            Self::Low => 0.25,
            Self::Medium => 0.5,
            Self::High => 0.75,
            Self::Highest => 1.0,
        }
    }
}

/// Availability tier of an aggregated location.
///
/// A location is occupied only when none of its connectors are available or
/// of unknown status; a single free connector lifts the whole location into
/// the available tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AvailabilityTier {
    /// At least one connector is free.
    Available,
    /// No free connector, but at least one with unknown status.
    Unknown,
    /// Every connector is occupied or out of service.
    Occupied,
}

/// One scored connector: a catalog row plus its per-request metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredStation {
    /// Identifier of the physical location.
    pub location_id: String,
    /// Identifier of this connector.
    pub station_id: String,
    /// WGS84 position of the location.
    pub position: Coord<f64>,
    /// Operator name.
    pub operator: String,
    /// Street address.
    pub address: String,
    /// Connector type.
    pub plug: String,
    /// Charging network tag.
    pub network: String,
    /// Rated power in kW.
    pub power_kw: f64,
    /// Electrical supply type.
    pub power_type: PowerType,
    /// Live availability status.
    pub status: StationStatus,
    /// Travel distance in metres on the mode's basis.
    pub distance_m: f64,
    /// Drive time in minutes on the mode's basis.
    pub drive_duration_min: f64,
    /// Effective charging power in kW for the requesting vehicle; `0` when
    /// the connector is unusable.
    pub effective_power_kw: f64,
    /// Energy to charge in kWh under the mode's energy model.
    pub energy_kwh: f64,
    /// Session cost in CHF; `None` when the connector is unusable.
    pub cost_chf: Option<f64>,
    /// Charging duration in minutes; `None` when the connector is unusable.
    pub charge_duration_min: Option<f64>,
    /// Normalized cost favourability in `[0, 1]`.
    pub cost_score: f64,
    /// Normalized power favourability in `[0, 1]`.
    pub power_score: f64,
    /// Normalized distance favourability in `[0, 1]`.
    pub distance_score: f64,
    /// Normalized charging-duration favourability in `[0, 1]`.
    pub duration_score: f64,
    /// Weighted relevance score in `[0, 10]`, rounded to one decimal.
    pub relevance_score: f64,
    /// Quintile band of the score within the candidate set.
    pub relevance_category: RelevanceCategory,
}

/// Aggregated display record for one physical location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationGroup {
    /// Identifier of the physical location.
    pub location_id: String,
    /// WGS84 position of the location.
    pub position: Coord<f64>,
    /// Operator name.
    pub operator: String,
    /// Street address.
    pub address: String,
    /// Distinct networks of the grouped connectors, slash-joined.
    pub networks: String,
    /// Distinct connector types of the grouped connectors, slash-joined.
    pub plugs: String,
    /// Distinct rated powers of the grouped connectors, slash-joined.
    pub power_ratings: String,
    /// Availability tier of the location.
    pub tier: AvailabilityTier,
    /// Highest relevance score among the grouped connectors.
    pub relevance_score: f64,
    /// Category of the highest-scoring connector.
    pub relevance_category: RelevanceCategory,
    /// Travel distance in metres of the highest-scoring connector.
    pub distance_m: f64,
    /// Drive time in minutes of the highest-scoring connector.
    pub drive_duration_min: f64,
    /// Number of connectors grouped into this record.
    pub connector_count: usize,
}

/// Relevance score of one connector, keyed for detail-panel lookups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectorScore {
    /// Identifier of the physical location.
    pub location_id: String,
    /// Connector type at that location.
    pub plug: String,
    /// Relevance score of the connector.
    pub score: f64,
}

/// A successful, non-empty ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    /// Context title for the result, e.g. `von Basel nach Bern`.
    pub title: String,
    /// Aggregated locations, ordered by tier and descending score.
    pub groups: Vec<StationGroup>,
    /// Per-connector scores for later detail lookups.
    pub connector_scores: Vec<ConnectorScore>,
}

impl Ranking {
    /// Look up the relevance score of a connector by location and plug.
    pub fn score_for(&self, location_id: &str, plug: &str) -> Option<f64> {
        self.connector_scores
            .iter()
            .find(|entry| entry.location_id == location_id && entry.plug == plug)
            .map(|entry| entry.score)
    }
}

/// Explicit empty result: the filters left no station to rank.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmptyResult {
    /// Context title for the result.
    pub title: String,
}

/// Outcome of a ranking request.
///
/// An empty candidate set is a legitimate user-facing result, not an error,
/// so it gets its own variant rather than an `Err`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum RankOutcome {
    /// At least one station survived the filters and was scored.
    Ranked(Ranking),
    /// The filters left nothing to rank.
    NoStations(EmptyResult),
}

impl RankOutcome {
    /// The ranking, when the outcome is non-empty.
    pub const fn ranking(&self) -> Option<&Ranking> {
        match self {
            Self::Ranked(ranking) => Some(ranking),
            Self::NoStations(_) => None,
        }
    }

    /// The context title of either outcome.
    pub fn title(&self) -> &str {
        match self {
            Self::Ranked(ranking) => &ranking.title,
            Self::NoStations(empty) => &empty.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_weights_step_by_quarters() {
        assert_eq!(RelevanceCategory::Lowest.display_weight(), 0.0);
        assert_eq!(RelevanceCategory::Medium.display_weight(), 0.5);
        assert_eq!(RelevanceCategory::Highest.display_weight(), 1.0);
    }

    #[test]
    fn tier_order_matches_display_order() {
        assert!(AvailabilityTier::Available < AvailabilityTier::Unknown);
        assert!(AvailabilityTier::Unknown < AvailabilityTier::Occupied);
    }

    #[test]
    fn connector_score_lookup() {
        let ranking = Ranking {
            title: "Basel".to_owned(),
            groups: Vec::new(),
            connector_scores: vec![
                ConnectorScore {
                    location_id: "loc-1".to_owned(),
                    plug: "CCS".to_owned(),
                    score: 7.5,
                },
                ConnectorScore {
                    location_id: "loc-1".to_owned(),
                    plug: "Tesla".to_owned(),
                    score: 6.0,
                },
            ],
        };
        assert_eq!(ranking.score_for("loc-1", "Tesla"), Some(6.0));
        assert_eq!(ranking.score_for("loc-2", "CCS"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn outcome_serializes_with_a_tag() {
        let outcome = RankOutcome::NoStations(EmptyResult {
            title: "Basel".to_owned(),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "no_stations");
        assert_eq!(json["title"], "Basel");
    }
}
