//! Trip context: start, optional destination, and the charging strategy.
//!
//! The charging mode is a closed enum so every consumer of the pipeline has
//! to handle all three strategies explicitly; there is no string-typed mode
//! that could silently fall through a match.

use thiserror::Error;

/// Charging strategy selected for the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChargingMode {
    /// Charge close to the start place.
    NearStart,
    /// Charge at a stop on the way to the destination.
    EnRoute,
    /// Charge close to the destination.
    Destination,
}

impl ChargingMode {
    /// Return the mode as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use voltside_core::ChargingMode;
    ///
    /// assert_eq!(ChargingMode::EnRoute.as_str(), "en_route");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NearStart => "near_start",
            Self::EnRoute => "en_route",
            Self::Destination => "destination",
        }
    }

    /// Whether the mode needs a destination place to be meaningful.
    pub const fn needs_destination(self) -> bool {
        match self {
            Self::NearStart => false,
            Self::EnRoute | Self::Destination => true,
        }
    }
}

impl std::fmt::Display for ChargingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChargingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "near_start" => Ok(Self::NearStart),
            "en_route" => Ok(Self::EnRoute),
            "destination" => Ok(Self::Destination),
            _ => Err(format!("unknown charging mode '{s}'")),
        }
    }
}

/// Errors returned by [`TripContext::new`] and [`TripContext::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripContextError {
    /// A destination-bound mode was selected without a destination place.
    #[error("charging mode '{mode}' requires a destination place")]
    MissingDestination {
        /// The offending mode.
        mode: ChargingMode,
    },
    /// Remaining range or detour budget was negative or not finite.
    #[error("{field} must be a non-negative finite number of kilometres")]
    InvalidDistance {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// The trip a ranking request is computed for.
///
/// # Examples
/// ```
/// use voltside_core::{ChargingMode, TripContext};
///
/// let trip = TripContext::new("Basel", Some("Bern"), ChargingMode::EnRoute, 100.0, 10.0)?;
/// assert_eq!(trip.start_place, "Basel");
/// # Ok::<(), voltside_core::TripContextError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripContext {
    /// Start place name.
    pub start_place: String,
    /// Destination place name; required for destination-bound modes.
    pub destination_place: Option<String>,
    /// Selected charging strategy.
    pub mode: ChargingMode,
    /// Remaining vehicle range in kilometres.
    pub remaining_range_km: f64,
    /// Accepted detour in kilometres.
    pub detour_budget_km: f64,
}

impl TripContext {
    /// Validate and construct a trip context.
    ///
    /// # Errors
    /// Returns [`TripContextError`] when a destination-bound mode lacks a
    /// destination or a distance field is negative or not finite.
    pub fn new(
        start_place: impl Into<String>,
        destination_place: Option<&str>,
        mode: ChargingMode,
        remaining_range_km: f64,
        detour_budget_km: f64,
    ) -> Result<Self, TripContextError> {
        let trip = Self {
            start_place: start_place.into(),
            destination_place: destination_place.map(str::to_owned),
            mode,
            remaining_range_km,
            detour_budget_km,
        };
        trip.validate()?;
        Ok(trip)
    }

    /// Re-check the invariants, e.g. after deserializing a request.
    ///
    /// # Errors
    /// Same conditions as [`TripContext::new`].
    pub fn validate(&self) -> Result<(), TripContextError> {
        if self.mode.needs_destination() && self.destination_place.is_none() {
            return Err(TripContextError::MissingDestination { mode: self.mode });
        }
        if !self.remaining_range_km.is_finite() || self.remaining_range_km < 0.0 {
            return Err(TripContextError::InvalidDistance {
                field: "remaining_range_km",
            });
        }
        if !self.detour_budget_km.is_finite() || self.detour_budget_km < 0.0 {
            return Err(TripContextError::InvalidDistance {
                field: "detour_budget_km",
            });
        }
        Ok(())
    }

    /// Remaining range in metres.
    pub fn remaining_range_m(&self) -> f64 {
        self.remaining_range_km * 1000.0
    }

    /// Detour budget in metres.
    pub fn detour_budget_m(&self) -> f64 {
        self.detour_budget_km * 1000.0
    }

    /// Context title shown with the result: the start name, or
    /// `von {start} nach {dest}` once a destination is chosen.
    pub fn title(&self) -> String {
        match &self.destination_place {
            Some(destination) => format!("von {} nach {}", self.start_place, destination),
            None => self.start_place.clone(),
        }
    }
}

/// Modes selectable for a trip, given the direct start→destination distance.
///
/// Without a destination only [`ChargingMode::NearStart`] is offered. With
/// one, the destination-bound modes become available only while the direct
/// distance is still within the remaining range; otherwise the destination
/// cannot be reached on the current charge and only near-start charging
/// makes sense.
pub fn available_modes(direct_m: Option<f64>, remaining_range_km: f64) -> Vec<ChargingMode> {
    match direct_m {
        Some(direct) if direct < remaining_range_km * 1000.0 => vec![
            ChargingMode::NearStart,
            ChargingMode::EnRoute,
            ChargingMode::Destination,
        ],
        _ => vec![ChargingMode::NearStart],
    }
}
