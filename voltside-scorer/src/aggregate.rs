//! Aggregation of scored connectors into per-location display groups.
//!
//! One physical site may expose several connectors with different types,
//! power ratings, and prices. The consumer shows a site once, so the scored
//! rows collapse into one record per `(lon, lat)` with merged descriptive
//! fields and the best connector's score.

use std::collections::HashMap;

use voltside_core::{
    AvailabilityTier, ConnectorScore, Ranking, ScoredStation, StationGroup, StationStatus,
};

/// Group the scored connectors and produce the ordered ranking.
///
/// Locations sort by availability tier first, then by descending relevance
/// score; ties keep their first-seen input order (the sort is stable).
pub(crate) fn group(
    scored: Vec<ScoredStation>,
    available_only: bool,
    title: String,
) -> Ranking {
    let connector_scores = scored
        .iter()
        .map(|station| ConnectorScore {
            location_id: station.location_id.clone(),
            plug: station.plug.clone(),
            score: station.relevance_score,
        })
        .collect();

    let mut order: Vec<Vec<ScoredStation>> = Vec::new();
    let mut index_by_position: HashMap<(u64, u64), usize> = HashMap::new();
    for station in scored {
        let key = (station.position.x.to_bits(), station.position.y.to_bits());
        match index_by_position.get(&key) {
            Some(&index) => {
                if let Some(bucket) = order.get_mut(index) {
                    bucket.push(station);
                }
            }
            None => {
                index_by_position.insert(key, order.len());
                order.push(vec![station]);
            }
        }
    }

    let mut groups: Vec<StationGroup> = order
        .into_iter()
        .filter(|connectors| {
            !available_only || connectors.iter().any(|c| c.status == StationStatus::Available)
        })
        .filter_map(|connectors| merge_location(&connectors))
        .collect();

    groups.sort_by(|a, b| {
        a.tier.cmp(&b.tier).then_with(|| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    Ranking {
        title,
        groups,
        connector_scores,
    }
}

/// Collapse the connectors of one location into a display group.
fn merge_location(connectors: &[ScoredStation]) -> Option<StationGroup> {
    let best = connectors.iter().fold(None::<&ScoredStation>, |best, c| {
        match best {
            Some(current) if current.relevance_score >= c.relevance_score => Some(current),
            _ => Some(c),
        }
    })?;

    Some(StationGroup {
        location_id: best.location_id.clone(),
        position: best.position,
        operator: best.operator.clone(),
        address: best.address.clone(),
        networks: join_distinct(connectors.iter().map(|c| c.network.clone())),
        plugs: join_distinct(connectors.iter().map(|c| c.plug.clone())),
        power_ratings: join_distinct(connectors.iter().map(|c| c.power_kw.to_string())),
        tier: location_tier(connectors),
        relevance_score: best.relevance_score,
        relevance_category: best.relevance_category,
        distance_m: best.distance_m,
        drive_duration_min: best.drive_duration_min,
        connector_count: connectors.len(),
    })
}

/// Availability tier of a location: available beats unknown beats occupied.
///
/// A location counts as occupied only when none of its connectors are
/// available or of unknown status.
fn location_tier(connectors: &[ScoredStation]) -> AvailabilityTier {
    if connectors
        .iter()
        .any(|c| c.status == StationStatus::Available)
    {
        AvailabilityTier::Available
    } else if connectors.iter().any(|c| c.status == StationStatus::Unknown) {
        AvailabilityTier::Unknown
    } else {
        AvailabilityTier::Occupied
    }
}

/// Join distinct values with a slash, keeping first-seen order and
/// collapsing identical repeats.
fn join_distinct<I>(values: I) -> String
where
    I: Iterator<Item = String>,
{
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_distinct_collapses_repeats_in_order() {
        let merged = join_distinct(
            ["CCS", "Tesla", "CCS"].into_iter().map(str::to_owned),
        );
        assert_eq!(merged, "CCS/Tesla");
    }

    #[test]
    fn join_distinct_keeps_a_single_value_plain() {
        let merged = join_distinct(["CCS", "CCS"].into_iter().map(str::to_owned));
        assert_eq!(merged, "CCS");
    }
}
