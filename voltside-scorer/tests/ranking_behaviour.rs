#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the end-to-end ranking flow.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voltside_core::test_support::{SnapshotBuilder, StationBuilder};
use voltside_core::{
    CatalogSnapshot, ChargingMode, RankOutcome, SubscriptionPlan, TripContext, VehicleProfile,
    WeightError, WeightVector,
};
use voltside_scorer::{FilterSelection, RankError, rank};

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    snapshot: RefCell<Option<CatalogSnapshot>>,
    outcome: RefCell<Option<Result<RankOutcome, RankError>>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        snapshot: RefCell::new(None),
        outcome: RefCell::new(None),
    }
}

fn vehicle() -> VehicleProfile {
    VehicleProfile::new(69.0, 124.0, 11.0, 3, ["CCS", "Kabel Typ 2"])
}

fn trip() -> TripContext {
    TripContext::new("Basel", None, ChargingMode::NearStart, 100.0, 30.0).expect("valid trip")
}

fn run_with_filters(
    context: &TestContext,
    adjust: impl FnOnce(&mut FilterSelection),
    weights: WeightVector,
) {
    let snapshot = context.snapshot.borrow();
    let snapshot = snapshot.as_ref().expect("catalog must be initialised");
    let mut filters = FilterSelection::for_catalog(snapshot);
    adjust(&mut filters);
    let outcome = rank(
        snapshot,
        &trip(),
        &filters,
        weights,
        &vehicle(),
        SubscriptionPlan::new(0.49, 0.0, 1.0),
    );
    *context.outcome.borrow_mut() = Some(outcome);
}

#[given("a catalog with a close and a far station near Basel")]
fn catalog_with_two_stations(context: &TestContext) {
    let snapshot = SnapshotBuilder::basel()
        .station(
            StationBuilder::new("loc-close", "st-close")
                .position(7.60, 47.56)
                .leg("Basel", 3_000.0, 5.0),
        )
        .station(
            StationBuilder::new("loc-far", "st-far")
                .position(7.65, 47.52)
                .leg("Basel", 20_000.0, 18.0),
        )
        .build()
        .expect("valid snapshot");
    *context.snapshot.borrow_mut() = Some(snapshot);
}

#[when("I rank stations for a near-start trip from Basel")]
fn rank_near_start(context: &TestContext) {
    run_with_filters(context, |_| {}, WeightVector::default());
}

#[when("I rank with an empty connector selection")]
fn rank_with_empty_plugs(context: &TestContext) {
    run_with_filters(context, |filters| filters.plugs.clear(), WeightVector::default());
}

#[when("I rank with all-zero weights")]
fn rank_with_zero_weights(context: &TestContext) {
    run_with_filters(context, |_| {}, WeightVector::new(0.0, 0.0, 0.0, 0.0));
}

#[then("the closer station is ranked first")]
fn assert_closer_first(context: &TestContext) {
    let outcome = context.outcome.borrow();
    let outcome = outcome
        .as_ref()
        .expect("outcome must be recorded")
        .as_ref()
        .expect("ranking should succeed");
    let ranking = outcome.ranking().expect("ranked outcome");
    let first = ranking.groups.first().expect("at least one group");
    assert_eq!(first.location_id, "loc-close");
}

#[then("the outcome reports no stations")]
fn assert_no_stations(context: &TestContext) {
    let outcome = context.outcome.borrow();
    let outcome = outcome
        .as_ref()
        .expect("outcome must be recorded")
        .as_ref()
        .expect("ranking should succeed");
    assert!(matches!(outcome, RankOutcome::NoStations(_)));
}

#[then("the request fails weight validation")]
fn assert_weight_failure(context: &TestContext) {
    let outcome = context.outcome.borrow();
    let result = outcome.as_ref().expect("outcome must be recorded");
    assert_eq!(
        result.as_ref().expect_err("weights should be rejected"),
        &RankError::Weights(WeightError::Degenerate)
    );
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn ranking_near_start(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn empty_selection(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn degenerate_weights(context: TestContext) {
    let _ = context;
}
