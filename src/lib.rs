//! Facade crate for the Voltside charging-station relevance engine.
//!
//! This crate re-exports the core domain types and the ranking pipeline, and
//! exposes the CSV catalog loader behind a feature flag.

#![forbid(unsafe_code)]

pub use voltside_core::{
    AvailabilityTier, CatalogError, CatalogSnapshot, CatalogSource, ChargingMode, ConnectorScore,
    EmptyResult, Leg, Place, PlaceDirectory, PlacePair, PlanCatalog, PowerType, RankOutcome,
    Ranking, RelevanceCategory, ScoredStation, StationGroup, StationRecord, StationStatus,
    SubscriptionPlan, TravelView, TripContext, TripContextError, VehicleCatalog, VehicleProfile,
    WeightError, WeightVector, available_modes,
};

pub use voltside_scorer::{FilterSelection, RankError, RankRequest, rank, rank_request};

#[cfg(feature = "ingest-csv")]
pub use voltside_data::{CsvCatalogSource, IngestError};
