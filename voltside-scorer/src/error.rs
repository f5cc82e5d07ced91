//! Error type of the ranking pipeline.
//!
//! Only structural failures surface here: incomplete catalog data, invalid
//! request parameters, or an unknown vehicle model. Data-level oddities — an
//! unusable connector, an empty candidate set — are represented in the
//! outcome instead.

use thiserror::Error;

use voltside_core::{CatalogError, TripContextError, WeightError};

/// Errors returned by [`rank`](crate::rank) and
/// [`rank_request`](crate::rank_request).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// The catalog travel data is structurally incomplete for this trip.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The trip context failed validation.
    #[error(transparent)]
    InvalidTrip(#[from] TripContextError),
    /// The weight vector failed validation, e.g. the degenerate all-zero
    /// vector.
    #[error(transparent)]
    Weights(#[from] WeightError),
    /// The requested vehicle model is not in the vehicle catalog.
    #[error("unknown vehicle model '{model}'")]
    UnknownVehicle {
        /// The model name that failed to resolve.
        model: String,
    },
}
