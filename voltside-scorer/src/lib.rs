//! Station relevance pipeline for the Voltside engine.
//!
//! Given an immutable [`CatalogSnapshot`], a trip context, filter settings,
//! preference weights, and the vehicle/subscription inputs, the pipeline:
//!
//! 1. keeps the stations reachable under the chosen charging mode;
//! 2. narrows them by connector type, network, status, and power band;
//! 3. derives effective charging power, session cost, and charging duration
//!    per candidate for this vehicle and subscription;
//! 4. normalizes the metrics across the candidate set and combines them into
//!    a weighted relevance score in `[0, 10]` with five display categories;
//! 5. aggregates connectors sharing one physical location into a single
//!    ranked display group.
//!
//! The computation is pure and synchronous: it never mutates the snapshot,
//! holds no state between requests, and produces identical output for
//! identical input.
//!
//! # Examples
//!
//! ```
//! use voltside_core::test_support::{SnapshotBuilder, StationBuilder};
//! use voltside_core::{ChargingMode, PlanCatalog, TripContext, VehicleCatalog, WeightVector};
//! use voltside_scorer::{FilterSelection, RankRequest, rank_request};
//!
//! let snapshot = SnapshotBuilder::basel()
//!     .station(StationBuilder::new("loc-1", "st-1").leg("Basel", 2_000.0, 4.0))
//!     .build()?;
//! let request = RankRequest {
//!     vehicle: "Renault Zoe R135".to_owned(),
//!     plan: "evpass".to_owned(),
//!     trip: TripContext::new("Basel", None, ChargingMode::NearStart, 100.0, 10.0)?,
//!     filters: FilterSelection::for_catalog(&snapshot),
//!     weights: WeightVector::default(),
//! };
//! let outcome = rank_request(
//!     &snapshot,
//!     &request,
//!     &VehicleCatalog::builtin(),
//!     &PlanCatalog::builtin(),
//! )?;
//! assert!(outcome.ranking().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

use voltside_core::{
    CatalogSnapshot, EmptyResult, PlanCatalog, RankOutcome, Ranking, SubscriptionPlan,
    TripContext, VehicleCatalog, VehicleProfile, WeightVector,
};

mod aggregate;
mod error;
mod filter;
mod metrics;
mod reachability;
mod relevance;

pub use error::RankError;
pub use filter::FilterSelection;
pub use metrics::effective_power_kw;

#[cfg(test)]
mod tests;

/// A complete ranking request as submitted by a consumer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankRequest {
    /// Vehicle model name, resolved against the vehicle catalog.
    pub vehicle: String,
    /// Subscription plan name; unknown plans degrade to zero pricing.
    pub plan: String,
    /// The trip the ranking is computed for.
    pub trip: TripContext,
    /// Attribute filter settings.
    pub filters: FilterSelection,
    /// Preference weights.
    #[serde(default)]
    pub weights: WeightVector,
}

/// Rank the catalog for a request, resolving vehicle and plan by name.
///
/// The vehicle lookup is fatal when the model is unknown — nothing can be
/// computed without a charging profile. An unknown plan degrades to the
/// all-zero plan instead.
///
/// # Errors
/// Returns [`RankError`] for an unknown vehicle model, an invalid trip or
/// weight vector, or structurally incomplete catalog data.
pub fn rank_request(
    snapshot: &CatalogSnapshot,
    request: &RankRequest,
    vehicles: &VehicleCatalog,
    plans: &PlanCatalog,
) -> Result<RankOutcome, RankError> {
    let vehicle = vehicles
        .lookup(&request.vehicle)
        .ok_or_else(|| RankError::UnknownVehicle {
            model: request.vehicle.clone(),
        })?;
    if plans.lookup(&request.plan).is_none() {
        log::debug!("unknown subscription plan '{}', pricing as zero", request.plan);
    }
    let plan = plans.resolve(&request.plan);
    rank(
        snapshot,
        &request.trip,
        &request.filters,
        request.weights,
        vehicle,
        plan,
    )
}

/// Rank the catalog for an already-resolved vehicle profile and plan.
///
/// # Errors
/// Returns [`RankError`] when the trip or weights fail validation or the
/// catalog travel data is structurally incomplete.
pub fn rank(
    snapshot: &CatalogSnapshot,
    trip: &TripContext,
    filters: &FilterSelection,
    weights: WeightVector,
    vehicle: &VehicleProfile,
    plan: SubscriptionPlan,
) -> Result<RankOutcome, RankError> {
    trip.validate()?;
    let validated_weights = weights.validate()?;
    let view = snapshot.travel_view(trip)?;

    let reachable = reachability::reachable(snapshot.stations(), &view, trip)?;
    log::debug!(
        "{} of {} stations reachable in mode {}",
        reachable.len(),
        snapshot.stations().len(),
        trip.mode
    );

    let matching = filter::apply(reachable, filters);
    log::debug!("{} stations match the attribute filters", matching.len());
    if matching.is_empty() {
        return Ok(RankOutcome::NoStations(EmptyResult { title: trip.title() }));
    }

    let candidates = metrics::compute(&matching, &view, trip, vehicle, plan)?;
    let scored = relevance::score(candidates, validated_weights);
    let ranking: Ranking = aggregate::group(scored, filters.available_only, trip.title());
    Ok(RankOutcome::Ranked(ranking))
}
