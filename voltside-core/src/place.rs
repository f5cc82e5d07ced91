//! Places of interest and their pairwise direct-distance matrix.
//!
//! The direct distances are the road distances between two places without a
//! charging stop. They serve only as the baseline for the en-route detour
//! computation and for mode availability; station distances always come from
//! the per-station travel legs.

use std::collections::BTreeMap;

use geo::Coord;

/// A named place of interest that can start or end a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Display name, unique within the directory.
    pub name: String,
    /// WGS84 position, `x = longitude`, `y = latitude`.
    pub position: Coord<f64>,
    /// Direct road distance in metres to every other place, keyed by name.
    pub direct_m: BTreeMap<String, f64>,
}

impl Place {
    /// Construct a place from name, position, and direct-distance row.
    pub fn new(
        name: impl Into<String>,
        position: Coord<f64>,
        direct_m: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            direct_m,
        }
    }
}

/// Lookup directory over the known places of interest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDirectory {
    places: BTreeMap<String, Place>,
}

impl PlaceDirectory {
    /// Build a directory from a collection of places.
    pub fn new<I>(places: I) -> Self
    where
        I: IntoIterator<Item = Place>,
    {
        Self {
            places: places
                .into_iter()
                .map(|place| (place.name.clone(), place))
                .collect(),
        }
    }

    /// Look up a place by name.
    pub fn get(&self, name: &str) -> Option<&Place> {
        self.places.get(name)
    }

    /// Whether the directory knows the named place.
    pub fn contains(&self, name: &str) -> bool {
        self.places.contains_key(name)
    }

    /// Iterate over place names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.places.keys().map(String::as_str)
    }

    /// Number of places in the directory.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Direct road distance in metres between two places, if recorded.
    pub fn direct_distance_m(&self, from: &str, to: &str) -> Option<f64> {
        self.places.get(from)?.direct_m.get(to).copied()
    }
}
