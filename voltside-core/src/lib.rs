//! Core domain types for the Voltside charging-station relevance engine.
//!
//! The crate models the static station catalog, places of interest, vehicle
//! charging profiles, subscription plans, trip context, and the scored output
//! types the ranking pipeline produces. All catalog data lives in an
//! immutable [`CatalogSnapshot`] that is passed explicitly through every
//! call; nothing in this crate holds module-level state.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod place;
pub mod scored;
pub mod station;
pub mod subscription;
pub mod trip;
pub mod vehicle;
pub mod weights;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{CatalogError, CatalogSnapshot, CatalogSource, TravelView};
pub use place::{Place, PlaceDirectory};
pub use scored::{
    AvailabilityTier, ConnectorScore, EmptyResult, RankOutcome, Ranking, RelevanceCategory,
    ScoredStation, StationGroup,
};
pub use station::{Leg, PlacePair, PowerType, StationRecord, StationStatus};
pub use subscription::{PlanCatalog, SubscriptionPlan};
pub use trip::{ChargingMode, TripContext, TripContextError, available_modes};
pub use vehicle::{VehicleCatalog, VehicleProfile};
pub use weights::{WeightError, WeightVector};
