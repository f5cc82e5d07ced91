//! Attribute filtering of the reachable station set.

use std::collections::BTreeSet;

use voltside_core::{CatalogSnapshot, StationRecord, StationStatus};

const fn default_min_power() -> f64 {
    0.0
}

const fn unbounded_power() -> f64 {
    f64::INFINITY
}

fn is_unbounded(value: &f64) -> bool {
    value.is_infinite()
}

/// User-selected attribute filters.
///
/// The plug and network selections are positive lists: an empty selection
/// filters to nothing rather than disabling the filter, mirroring an
/// unticked checklist in the consumer UI.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSelection {
    /// Accepted connector types.
    pub plugs: BTreeSet<String>,
    /// Accepted charging networks.
    pub networks: BTreeSet<String>,
    /// Keep only stations whose connector is currently available.
    #[serde(default)]
    pub available_only: bool,
    /// Lower bound of the accepted rated power in kW, inclusive.
    #[serde(default = "default_min_power")]
    pub min_power_kw: f64,
    /// Upper bound of the accepted rated power in kW, inclusive. Omitted
    /// from serialized form when unbounded, since JSON has no infinity.
    #[serde(default = "unbounded_power", skip_serializing_if = "is_unbounded")]
    pub max_power_kw: f64,
}

impl Default for FilterSelection {
    /// Empty selections with an unbounded power band.
    ///
    /// Note that empty selections match nothing; use
    /// [`FilterSelection::for_catalog`] to start from "everything selected".
    fn default() -> Self {
        Self {
            plugs: BTreeSet::new(),
            networks: BTreeSet::new(),
            available_only: false,
            min_power_kw: default_min_power(),
            max_power_kw: unbounded_power(),
        }
    }
}

impl FilterSelection {
    /// Select every plug and network present in the snapshot, with the
    /// status filter off and an unbounded power band — the "all boxes
    /// ticked" starting state of the consumer UI.
    pub fn for_catalog(snapshot: &CatalogSnapshot) -> Self {
        let mut selection = Self::default();
        for station in snapshot.stations() {
            selection.plugs.insert(station.plug.clone());
            selection.networks.insert(station.network.clone());
        }
        selection
    }

    fn matches(&self, station: &StationRecord) -> bool {
        self.plugs.contains(&station.plug)
            && self.networks.contains(&station.network)
            && (!self.available_only || station.status == StationStatus::Available)
            && station.power_kw >= self.min_power_kw
            && station.power_kw <= self.max_power_kw
    }
}

/// Apply the attribute filters to the reachable rows.
///
/// The predicates combine with logical AND; an empty plug or network
/// selection empties the result outright.
pub(crate) fn apply<'a>(
    rows: Vec<&'a StationRecord>,
    selection: &FilterSelection,
) -> Vec<&'a StationRecord> {
    if selection.plugs.is_empty() || selection.networks.is_empty() {
        return Vec::new();
    }
    rows.into_iter()
        .filter(|station| selection.matches(station))
        .collect()
}
