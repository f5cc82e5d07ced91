//! Unit coverage for the ranking pipeline stages.

use rstest::rstest;
use voltside_core::test_support::{SnapshotBuilder, StationBuilder};
use voltside_core::{
    CatalogSnapshot, ChargingMode, PlanCatalog, PowerType, RankOutcome, RelevanceCategory,
    StationStatus, SubscriptionPlan, TripContext, VehicleCatalog, VehicleProfile, WeightError,
    WeightVector,
};

use crate::{FilterSelection, RankError, RankRequest, effective_power_kw, rank, rank_request};
use crate::{filter, metrics, reachability};

fn leaf() -> VehicleProfile {
    VehicleProfile::new(40.0, 50.0, 6.6, 1, ["CHAdeMO", "Kabel Typ 1"])
}

fn polestar() -> VehicleProfile {
    VehicleProfile::new(69.0, 124.0, 11.0, 3, ["CCS", "Kabel Typ 2"])
}

fn model3() -> VehicleProfile {
    VehicleProfile::new(75.0, 250.0, 11.0, 3, ["CCS", "Kabel Typ 2", "Tesla"])
}

// --- metric calculator -------------------------------------------------

#[rstest]
#[case(PowerType::Dc, 150.0, polestar(), 124.0)]
#[case(PowerType::AcThreePhase, 22.0, leaf(), 7.33)]
#[case(PowerType::AcThreePhase, 11.0, model3(), 11.0)]
#[case(PowerType::AcSinglePhase, 7.4, leaf(), 6.6)]
#[case(PowerType::Dc, 45.0, leaf(), 45.0)]
fn effective_power_follows_the_rule_table(
    #[case] power_type: PowerType,
    #[case] rated: f64,
    #[case] vehicle: VehicleProfile,
    #[case] expected: f64,
) {
    assert_eq!(effective_power_kw(power_type, rated, &vehicle), expected);
}

#[rstest]
fn unsupported_phase_combination_is_unusable() {
    let two_phase = VehicleProfile::new(40.0, 50.0, 11.0, 2, ["CCS"]);
    assert_eq!(
        effective_power_kw(PowerType::AcThreePhase, 22.0, &two_phase),
        0.0
    );
}

#[rstest]
fn en_route_energy_is_the_fixed_top_up() {
    let energy = metrics::energy_to_charge_kwh(ChargingMode::EnRoute, 100.0, 40.0, 52.0);
    assert_eq!(energy, 15.0);
}

#[rstest]
fn near_start_energy_models_the_arrival_state() {
    // Arrive with 90 km of range left: the battery needs 260/350ths of its
    // capacity.
    let energy = metrics::energy_to_charge_kwh(ChargingMode::NearStart, 100.0, 10.0, 52.0);
    assert!((energy - 52.0 * 260.0 / 350.0).abs() < 1e-9);
}

#[rstest]
fn energy_is_clamped_at_zero() {
    // More range left than the reference maximum; no energy needed.
    let energy = metrics::energy_to_charge_kwh(ChargingMode::Destination, 400.0, 10.0, 52.0);
    assert_eq!(energy, 0.0);
}

#[rstest]
fn cost_combines_energy_time_and_session_fee() {
    let evpass = SubscriptionPlan::new(0.49, 0.0, 1.0);
    assert_eq!(metrics::session_cost_chf(15.0, 50.0, evpass), 8.35);

    let swisscharge = SubscriptionPlan::new(0.45, 0.05, 0.0);
    // 18 minutes at 50 kW add 0.90 on top of 6.75 for energy.
    assert_eq!(metrics::session_cost_chf(15.0, 50.0, swisscharge), 7.65);
}

#[rstest]
fn zero_plan_prices_everything_at_zero() {
    assert_eq!(
        metrics::session_cost_chf(15.0, 50.0, SubscriptionPlan::zero()),
        0.0
    );
}

#[rstest]
fn cost_is_monotone_in_energy() {
    let plan = SubscriptionPlan::new(0.45, 0.05, 1.0);
    let mut previous = 0.0;
    for energy in [1.0, 5.0, 15.0, 40.0, 75.0] {
        let cost = metrics::session_cost_chf(energy, 50.0, plan);
        assert!(cost >= previous, "cost fell from {previous} to {cost}");
        previous = cost;
    }
}

#[rstest]
fn duration_rounds_to_whole_minutes() {
    assert_eq!(metrics::charge_duration_min(15.0, 22.0), 41.0);
    assert_eq!(metrics::charge_duration_min(15.0, 50.0), 18.0);
}

// --- reachability filter -----------------------------------------------

fn near_start_snapshot() -> CatalogSnapshot {
    SnapshotBuilder::basel()
        .station(
            StationBuilder::new("loc-close", "st-close")
                .position(7.60, 47.56)
                .leg("Basel", 8_000.0, 9.0),
        )
        .station(
            StationBuilder::new("loc-far", "st-far")
                .position(7.70, 47.50)
                .leg("Basel", 50_000.0, 35.0),
        )
        .build()
        .expect("valid snapshot")
}

#[rstest]
fn near_start_detour_budget_excludes_what_the_range_admits() {
    let snapshot = near_start_snapshot();
    let trip = TripContext::new("Basel", None, ChargingMode::NearStart, 100.0, 10.0)
        .expect("valid trip");
    let view = snapshot.travel_view(&trip).expect("travel view");

    let reachable =
        reachability::reachable(snapshot.stations(), &view, &trip).expect("reachability");
    let ids: Vec<&str> = reachable.iter().map(|s| s.station_id.as_str()).collect();
    // 50 km is within the 100 km range but far beyond the 10 km detour cap.
    assert_eq!(ids, vec!["st-close"]);
}

#[rstest]
fn near_start_range_excludes_distant_stations() {
    let snapshot = near_start_snapshot();
    let trip = TripContext::new("Basel", None, ChargingMode::NearStart, 20.0, 60.0)
        .expect("valid trip");
    let view = snapshot.travel_view(&trip).expect("travel view");

    let reachable =
        reachability::reachable(snapshot.stations(), &view, &trip).expect("reachability");
    let ids: Vec<&str> = reachable.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(ids, vec!["st-close"]);
}

fn route_station(id: &str, lon: f64, from_basel: f64, from_bern: f64, via: f64) -> StationBuilder {
    StationBuilder::new(format!("loc-{id}"), format!("st-{id}"))
        .position(lon, 47.3)
        .leg("Basel", from_basel, from_basel / 1000.0)
        .leg("Bern", from_bern, from_bern / 1000.0)
        .via("Basel", "Bern", via, via / 1000.0)
        .via("Bern", "Basel", via, via / 1000.0)
}

fn en_route_snapshot() -> CatalogSnapshot {
    SnapshotBuilder::basel_bern()
        // 6 km of added detour against the 94 km direct baseline.
        .station(route_station("on-route", 7.50, 40_000.0, 60_000.0, 100_000.0))
        // 16 km of added detour: over a 10 km budget.
        .station(route_station("detour", 7.51, 45_000.0, 70_000.0, 110_000.0))
        // On the direct line: the added detour is negative.
        .station(route_station("direct-line", 7.52, 47_000.0, 47_000.0, 90_000.0))
        // Too far from the destination to finish any trip.
        .station(route_station("stranded", 7.53, 30_000.0, 360_000.0, 100_000.0))
        .build()
        .expect("valid snapshot")
}

#[rstest]
fn en_route_keeps_stations_within_the_detour_budget() {
    let snapshot = en_route_snapshot();
    let trip = TripContext::new("Basel", Some("Bern"), ChargingMode::EnRoute, 100.0, 10.0)
        .expect("valid trip");
    let view = snapshot.travel_view(&trip).expect("travel view");

    let reachable =
        reachability::reachable(snapshot.stations(), &view, &trip).expect("reachability");
    let ids: Vec<&str> = reachable.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(ids, vec!["st-on-route", "st-direct-line"]);
}

#[rstest]
fn en_route_negative_detour_always_passes_the_budget() {
    let snapshot = en_route_snapshot();
    let trip = TripContext::new("Basel", Some("Bern"), ChargingMode::EnRoute, 100.0, 0.0)
        .expect("valid trip");
    let view = snapshot.travel_view(&trip).expect("travel view");

    let reachable =
        reachability::reachable(snapshot.stations(), &view, &trip).expect("reachability");
    let ids: Vec<&str> = reachable.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(ids, vec!["st-direct-line"]);
}

#[rstest]
fn destination_mode_filters_on_the_destination_distance() {
    let snapshot = SnapshotBuilder::basel_bern()
        .station(route_station("near-bern", 7.46, 90_000.0, 5_000.0, 95_000.0))
        .station(route_station("near-basel", 7.58, 5_000.0, 90_000.0, 95_000.0))
        .build()
        .expect("valid snapshot");
    let trip = TripContext::new(
        "Basel",
        Some("Bern"),
        ChargingMode::Destination,
        120.0,
        10.0,
    )
    .expect("valid trip");
    let view = snapshot.travel_view(&trip).expect("travel view");

    let reachable =
        reachability::reachable(snapshot.stations(), &view, &trip).expect("reachability");
    let ids: Vec<&str> = reachable.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(ids, vec!["st-near-bern"]);
}

// --- attribute filter ---------------------------------------------------

#[rstest]
fn empty_plug_selection_filters_to_nothing() {
    let snapshot = near_start_snapshot();
    let rows: Vec<_> = snapshot.stations().iter().collect();
    let mut selection = FilterSelection::for_catalog(&snapshot);
    selection.plugs.clear();

    assert!(filter::apply(rows, &selection).is_empty());
}

#[rstest]
fn empty_network_selection_filters_to_nothing() {
    let snapshot = near_start_snapshot();
    let rows: Vec<_> = snapshot.stations().iter().collect();
    let mut selection = FilterSelection::for_catalog(&snapshot);
    selection.networks.clear();

    assert!(filter::apply(rows, &selection).is_empty());
}

#[rstest]
#[case(0.0, 50.0, 2)]
#[case(50.0, 300.0, 2)]
#[case(51.0, 300.0, 0)]
fn power_band_bounds_are_inclusive(
    #[case] min_kw: f64,
    #[case] max_kw: f64,
    #[case] expected: usize,
) {
    // Both fixture stations rate exactly 50 kW.
    let snapshot = near_start_snapshot();
    let rows: Vec<_> = snapshot.stations().iter().collect();
    let mut selection = FilterSelection::for_catalog(&snapshot);
    selection.min_power_kw = min_kw;
    selection.max_power_kw = max_kw;

    assert_eq!(filter::apply(rows, &selection).len(), expected);
}

#[rstest]
fn available_only_drops_other_statuses() {
    let snapshot = SnapshotBuilder::basel()
        .station(
            StationBuilder::new("loc-1", "st-1")
                .position(7.60, 47.56)
                .leg("Basel", 2_000.0, 3.0),
        )
        .station(
            StationBuilder::new("loc-2", "st-2")
                .position(7.61, 47.57)
                .status(StationStatus::Occupied)
                .leg("Basel", 3_000.0, 4.0),
        )
        .build()
        .expect("valid snapshot");
    let rows: Vec<_> = snapshot.stations().iter().collect();
    let mut selection = FilterSelection::for_catalog(&snapshot);
    selection.available_only = true;

    let kept = filter::apply(rows, &selection);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept.first().map(|s| s.station_id.as_str()), Some("st-1"));
}

// --- end-to-end pipeline ------------------------------------------------

fn default_trip() -> TripContext {
    TripContext::new("Basel", None, ChargingMode::NearStart, 100.0, 10.0).expect("valid trip")
}

#[rstest]
fn empty_candidate_set_is_an_outcome_not_an_error() {
    let snapshot = SnapshotBuilder::basel()
        .station(
            StationBuilder::new("loc-1", "st-1")
                .position(7.60, 47.56)
                .leg("Basel", 50_000.0, 35.0),
        )
        .build()
        .expect("valid snapshot");
    let outcome = rank(
        &snapshot,
        &default_trip(),
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::default(),
        &polestar(),
        SubscriptionPlan::zero(),
    )
    .expect("rank");

    assert!(matches!(outcome, RankOutcome::NoStations(_)));
    assert_eq!(outcome.title(), "Basel");
}

#[rstest]
fn degenerate_weights_are_rejected_before_scoring() {
    let snapshot = near_start_snapshot();
    let result = rank(
        &snapshot,
        &default_trip(),
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::new(0.0, 0.0, 0.0, 0.0),
        &polestar(),
        SubscriptionPlan::zero(),
    );

    assert_eq!(result, Err(RankError::Weights(WeightError::Degenerate)));
}

#[rstest]
fn unknown_vehicle_is_fatal() {
    let snapshot = near_start_snapshot();
    let request = RankRequest {
        vehicle: "DeLorean DMC-12".to_owned(),
        plan: "evpass".to_owned(),
        trip: default_trip(),
        filters: FilterSelection::for_catalog(&snapshot),
        weights: WeightVector::default(),
    };
    let result = rank_request(
        &snapshot,
        &request,
        &VehicleCatalog::builtin(),
        &PlanCatalog::builtin(),
    );

    assert_eq!(
        result,
        Err(RankError::UnknownVehicle {
            model: "DeLorean DMC-12".to_owned()
        })
    );
}

#[rstest]
fn unknown_plan_degrades_to_zero_pricing() {
    let snapshot = near_start_snapshot();
    let request = RankRequest {
        vehicle: "Polestar 2 Standard Range".to_owned(),
        plan: "ad-hoc".to_owned(),
        trip: default_trip(),
        filters: FilterSelection::for_catalog(&snapshot),
        weights: WeightVector::default(),
    };
    let outcome = rank_request(
        &snapshot,
        &request,
        &VehicleCatalog::builtin(),
        &PlanCatalog::builtin(),
    )
    .expect("rank");

    // The request still ranks; it just prices every session at zero.
    let ranking = outcome.ranking().expect("ranked outcome");
    assert!(ranking.score_for("loc-close", "CCS").is_some());
}

#[rstest]
fn closer_stations_outrank_farther_ones() {
    let snapshot = near_start_snapshot();
    let trip = TripContext::new("Basel", None, ChargingMode::NearStart, 100.0, 60.0)
        .expect("valid trip");
    let outcome = rank(
        &snapshot,
        &trip,
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::default(),
        &polestar(),
        SubscriptionPlan::new(0.49, 0.0, 1.0),
    )
    .expect("rank");

    let ranking = outcome.ranking().expect("ranked outcome");
    assert_eq!(ranking.groups.len(), 2);
    let first = ranking.groups.first().expect("first group");
    assert_eq!(first.location_id, "loc-close");
    assert!(first.relevance_score > ranking.groups.get(1).expect("second").relevance_score);
}

#[rstest]
fn single_candidate_lands_in_the_top_band() {
    let snapshot = SnapshotBuilder::basel()
        .station(
            StationBuilder::new("loc-1", "st-1")
                .position(7.60, 47.56)
                .leg("Basel", 2_000.0, 3.0),
        )
        .build()
        .expect("valid snapshot");
    let outcome = rank(
        &snapshot,
        &default_trip(),
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::default(),
        &polestar(),
        SubscriptionPlan::zero(),
    )
    .expect("rank");

    let ranking = outcome.ranking().expect("ranked outcome");
    let group = ranking.groups.first().expect("one group");
    assert_eq!(group.relevance_category, RelevanceCategory::Highest);
    assert!(group.relevance_score >= 0.0 && group.relevance_score <= 10.0);
}

#[rstest]
fn co_located_connectors_merge_into_one_group() {
    let snapshot = SnapshotBuilder::basel()
        .station(
            StationBuilder::new("loc-1", "st-1")
                .position(7.60, 47.56)
                .plug("CCS")
                .power(150.0)
                .leg("Basel", 2_000.0, 3.0),
        )
        .station(
            StationBuilder::new("loc-1", "st-2")
                .position(7.60, 47.56)
                .plug("Tesla")
                .power(120.0)
                .network("Tesla")
                .leg("Basel", 2_000.0, 3.0),
        )
        .build()
        .expect("valid snapshot");
    let outcome = rank(
        &snapshot,
        &default_trip(),
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::default(),
        &model3(),
        SubscriptionPlan::zero(),
    )
    .expect("rank");

    let ranking = outcome.ranking().expect("ranked outcome");
    assert_eq!(ranking.groups.len(), 1);
    let group = ranking.groups.first().expect("merged group");
    assert_eq!(group.plugs, "CCS/Tesla");
    assert_eq!(group.power_ratings, "150/120");
    assert_eq!(group.networks, "evpass/Tesla");
    assert_eq!(group.connector_count, 2);
    // Both connectors keep their individual scores for the detail panel.
    assert!(ranking.score_for("loc-1", "CCS").is_some());
    assert!(ranking.score_for("loc-1", "Tesla").is_some());
}

#[rstest]
fn occupied_locations_sort_behind_available_ones() {
    let snapshot = SnapshotBuilder::basel()
        // Occupied but otherwise the stronger offer.
        .station(
            StationBuilder::new("loc-occupied", "st-1")
                .position(7.60, 47.56)
                .power(150.0)
                .status(StationStatus::Occupied)
                .leg("Basel", 1_000.0, 2.0),
        )
        .station(
            StationBuilder::new("loc-free", "st-2")
                .position(7.61, 47.57)
                .power(50.0)
                .leg("Basel", 5_000.0, 7.0),
        )
        .build()
        .expect("valid snapshot");
    let outcome = rank(
        &snapshot,
        &default_trip(),
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::default(),
        &polestar(),
        SubscriptionPlan::zero(),
    )
    .expect("rank");

    let ranking = outcome.ranking().expect("ranked outcome");
    let ids: Vec<&str> = ranking
        .groups
        .iter()
        .map(|g| g.location_id.as_str())
        .collect();
    assert_eq!(ids, vec!["loc-free", "loc-occupied"]);
}

#[rstest]
fn location_with_any_free_connector_counts_as_available() {
    let snapshot = SnapshotBuilder::basel()
        .station(
            StationBuilder::new("loc-1", "st-1")
                .position(7.60, 47.56)
                .status(StationStatus::Occupied)
                .plug("CCS")
                .leg("Basel", 2_000.0, 3.0),
        )
        .station(
            StationBuilder::new("loc-1", "st-2")
                .position(7.60, 47.56)
                .plug("Kabel Typ 2")
                .power_type(PowerType::AcThreePhase)
                .power(22.0)
                .leg("Basel", 2_000.0, 3.0),
        )
        .build()
        .expect("valid snapshot");
    let outcome = rank(
        &snapshot,
        &default_trip(),
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::default(),
        &polestar(),
        SubscriptionPlan::zero(),
    )
    .expect("rank");

    let ranking = outcome.ranking().expect("ranked outcome");
    let group = ranking.groups.first().expect("merged group");
    assert_eq!(group.tier, voltside_core::AvailabilityTier::Available);
}

#[rstest]
fn unusable_connector_ranks_lowest() {
    let snapshot = SnapshotBuilder::basel()
        // CHAdeMO is not in the Polestar's plug set.
        .station(
            StationBuilder::new("loc-chademo", "st-1")
                .position(7.60, 47.56)
                .plug("CHAdeMO")
                .leg("Basel", 1_000.0, 2.0),
        )
        .station(
            StationBuilder::new("loc-ccs", "st-2")
                .position(7.61, 47.57)
                .leg("Basel", 5_000.0, 7.0),
        )
        .build()
        .expect("valid snapshot");
    let outcome = rank(
        &snapshot,
        &default_trip(),
        &FilterSelection::for_catalog(&snapshot),
        WeightVector::default(),
        &polestar(),
        SubscriptionPlan::new(0.49, 0.0, 1.0),
    )
    .expect("rank");

    let ranking = outcome.ranking().expect("ranked outcome");
    let first = ranking.groups.first().expect("first group");
    assert_eq!(first.location_id, "loc-ccs");
    let unusable = ranking.score_for("loc-chademo", "CHAdeMO").expect("score");
    let usable = ranking.score_for("loc-ccs", "CCS").expect("score");
    assert!(unusable < usable);
}

#[rstest]
fn reruns_produce_identical_output() {
    let snapshot = en_route_snapshot();
    let trip = TripContext::new("Basel", Some("Bern"), ChargingMode::EnRoute, 100.0, 10.0)
        .expect("valid trip");
    let filters = FilterSelection::for_catalog(&snapshot);
    let run = || {
        rank(
            &snapshot,
            &trip,
            &filters,
            WeightVector::default(),
            &model3(),
            SubscriptionPlan::new(0.45, 0.05, 0.0),
        )
        .expect("rank")
    };

    assert_eq!(run(), run());
}

#[rstest]
fn normalized_sub_scores_stay_in_the_unit_interval() {
    let snapshot = en_route_snapshot();
    let trip = TripContext::new("Basel", Some("Bern"), ChargingMode::EnRoute, 100.0, 10.0)
        .expect("valid trip");
    let view = snapshot.travel_view(&trip).expect("travel view");
    let reachable =
        reachability::reachable(snapshot.stations(), &view, &trip).expect("reachability");
    let candidates = metrics::compute(
        &reachable,
        &view,
        &trip,
        &model3(),
        SubscriptionPlan::new(0.49, 0.0, 1.0),
    )
    .expect("metrics");
    let scored = crate::relevance::score(candidates, WeightVector::default());

    for station in &scored {
        for sub in [
            station.cost_score,
            station.power_score,
            station.distance_score,
            station.duration_score,
        ] {
            assert!((0.0..=1.0).contains(&sub), "sub-score {sub} out of range");
        }
        assert!((0.0..=10.0).contains(&station.relevance_score));
    }
}
