//! Normalization, weighted scoring, and quintile categorization.
//!
//! All normalization happens across the current candidate set, not the full
//! catalog: the scores express how a station compares against the other
//! options of this particular request.

use voltside_core::{RelevanceCategory, ScoredStation, WeightVector};

use crate::metrics::Candidate;

/// Round to one decimal.
#[expect(clippy::float_arithmetic, reason = "decimal rounding of the score")]
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Maxima of the four metrics over the candidate set.
///
/// Cost and duration maxima only consider usable connectors; unusable ones
/// have no cost or duration to compare.
#[derive(Debug, Clone, Copy, Default)]
struct Maxima {
    cost: f64,
    power: f64,
    distance: f64,
    duration: f64,
}

impl Maxima {
    fn over(candidates: &[Candidate<'_>]) -> Self {
        let mut maxima = Self::default();
        for candidate in candidates {
            maxima.power = maxima.power.max(candidate.effective_power_kw);
            maxima.distance = maxima.distance.max(candidate.leg.distance_m);
            if let Some(cost) = candidate.cost_chf {
                maxima.cost = maxima.cost.max(cost);
            }
            if let Some(duration) = candidate.charge_duration_min {
                maxima.duration = maxima.duration.max(duration);
            }
        }
        maxima
    }
}

/// Normalize a lower-is-better metric against its maximum.
///
/// A zero maximum means every candidate ties at the optimum, so the
/// sub-score is `1`.
#[expect(clippy::float_arithmetic, reason = "normalization divides by the maximum")]
fn lower_is_better(value: f64, max: f64) -> f64 {
    if max == 0.0 { 1.0 } else { 1.0 - value / max }
}

/// Normalize a higher-is-better metric against its maximum.
///
/// A zero maximum means no candidate delivers anything, which is the worst
/// case, so the sub-score is `0`.
#[expect(clippy::float_arithmetic, reason = "normalization divides by the maximum")]
fn higher_is_better(value: f64, max: f64) -> f64 {
    if max == 0.0 { 0.0 } else { value / max }
}

/// Score and categorize the candidate set.
///
/// The weight vector must already be validated; the weighted mean divides by
/// the weight total.
#[expect(
    clippy::float_arithmetic,
    reason = "weighted combination of the normalized sub-scores"
)]
pub(crate) fn score(candidates: Vec<Candidate<'_>>, weights: WeightVector) -> Vec<ScoredStation> {
    let maxima = Maxima::over(&candidates);
    let total_weight = weights.total();

    let mut scored: Vec<ScoredStation> = candidates
        .into_iter()
        .map(|candidate| {
            let cost_score = candidate
                .cost_chf
                .map_or(0.0, |cost| lower_is_better(cost, maxima.cost));
            let duration_score = candidate
                .charge_duration_min
                .map_or(0.0, |duration| lower_is_better(duration, maxima.duration));
            let power_score = higher_is_better(candidate.effective_power_kw, maxima.power);
            let distance_score = lower_is_better(candidate.leg.distance_m, maxima.distance);

            let weighted = weights.cost * cost_score
                + weights.power * power_score
                + weights.distance * distance_score
                + weights.duration * duration_score;
            let relevance_score = round1(10.0 * weighted / total_weight);

            let record = candidate.record;
            ScoredStation {
                location_id: record.location_id.clone(),
                station_id: record.station_id.clone(),
                position: record.position,
                operator: record.operator.clone(),
                address: record.address.clone(),
                plug: record.plug.clone(),
                network: record.network.clone(),
                power_kw: record.power_kw,
                power_type: record.power_type,
                status: record.status,
                distance_m: candidate.leg.distance_m,
                drive_duration_min: candidate.leg.duration_min,
                effective_power_kw: candidate.effective_power_kw,
                energy_kwh: candidate.energy_kwh,
                cost_chf: candidate.cost_chf,
                charge_duration_min: candidate.charge_duration_min,
                cost_score,
                power_score,
                distance_score,
                duration_score,
                relevance_score,
                // Provisional; assigned below once the score range is known.
                relevance_category: RelevanceCategory::Highest,
            }
        })
        .collect();

    assign_categories(&mut scored);
    scored
}

/// Bucket the scores into five equal-width bands over the observed range.
#[expect(
    clippy::float_arithmetic,
    reason = "band boundaries partition the observed score range"
)]
fn assign_categories(scored: &mut [ScoredStation]) {
    let Some(first) = scored.first() else {
        return;
    };
    let mut min = first.relevance_score;
    let mut max = first.relevance_score;
    for station in scored.iter() {
        min = min.min(station.relevance_score);
        max = max.max(station.relevance_score);
    }
    let step = (max - min) / 5.0;
    for station in scored.iter_mut() {
        station.relevance_category = category_for(station.relevance_score, min, step);
    }
}

/// Band of one score, given the range minimum and the band width.
///
/// Upper bounds are inclusive; a zero-width range (a single candidate, or a
/// set of equal scores) lands everything in the top band.
#[expect(
    clippy::float_arithmetic,
    reason = "compares the score against the band boundaries"
)]
fn category_for(score: f64, min: f64, step: f64) -> RelevanceCategory {
    if step <= 0.0 {
        return RelevanceCategory::Highest;
    }
    if score <= min + step {
        RelevanceCategory::Lowest
    } else if score <= min + 2.0 * step {
        RelevanceCategory::Low
    } else if score <= min + 3.0 * step {
        RelevanceCategory::Medium
    } else if score <= min + 4.0 * step {
        RelevanceCategory::High
    } else {
        RelevanceCategory::Highest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.0, RelevanceCategory::Lowest)]
    #[case(4.0, RelevanceCategory::Low)]
    #[case(6.0, RelevanceCategory::Medium)]
    #[case(8.0, RelevanceCategory::High)]
    #[case(10.0, RelevanceCategory::Highest)]
    fn quintiles_partition_the_observed_range(
        #[case] score: f64,
        #[case] expected: RelevanceCategory,
    ) {
        // Range [2, 10], band width 1.6.
        assert_eq!(category_for(score, 2.0, 1.6), expected);
    }

    #[rstest]
    fn zero_width_range_lands_in_the_top_band() {
        assert_eq!(category_for(5.0, 5.0, 0.0), RelevanceCategory::Highest);
    }

    #[rstest]
    fn band_upper_bounds_are_inclusive() {
        // 3.6 sits exactly on the first boundary of [2, 10].
        assert_eq!(category_for(3.6, 2.0, 1.6), RelevanceCategory::Lowest);
    }

    #[rstest]
    fn lower_is_better_handles_a_zero_maximum() {
        assert_eq!(lower_is_better(0.0, 0.0), 1.0);
        assert_eq!(lower_is_better(5.0, 10.0), 0.5);
    }

    #[rstest]
    fn higher_is_better_handles_a_zero_maximum() {
        assert_eq!(higher_is_better(0.0, 0.0), 0.0);
        assert_eq!(higher_is_better(5.0, 10.0), 0.5);
    }
}
