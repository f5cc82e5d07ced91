//! User preference weights over the four ranking metrics.

use thiserror::Error;

/// Errors raised when validating a [`WeightVector`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    /// Every weight was zero; the weighted mean is undefined.
    #[error("at least one weight must be positive")]
    Degenerate,
    /// A weight was negative or not finite.
    #[error("weights must be finite and non-negative")]
    Invalid,
}

/// Relative importance of cost, power, distance, and charging duration.
///
/// Weights are unit-free multipliers; only their ratios matter. The all-zero
/// vector is degenerate and rejected by [`WeightVector::validate`] before the
/// scorer ever divides by the weight total.
///
/// # Examples
/// ```
/// use voltside_core::WeightVector;
///
/// let weights = WeightVector::new(2.0, 1.0, 1.0, 0.0).validate()?;
/// assert_eq!(weights.total(), 4.0);
/// # Ok::<(), voltside_core::WeightError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightVector {
    /// Multiplier for the monetary cost metric.
    pub cost: f64,
    /// Multiplier for the effective charging power metric.
    pub power: f64,
    /// Multiplier for the travel distance metric.
    pub distance: f64,
    /// Multiplier for the charging duration metric.
    pub duration: f64,
}

impl WeightVector {
    /// Construct a weight vector without validating it.
    pub const fn new(cost: f64, power: f64, distance: f64, duration: f64) -> Self {
        Self {
            cost,
            power,
            distance,
            duration,
        }
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightError::Invalid`] when a weight is negative or not
    /// finite and [`WeightError::Degenerate`] when all four are zero.
    pub fn validate(self) -> Result<Self, WeightError> {
        if !self.has_finite_non_negative_values() {
            return Err(WeightError::Invalid);
        }
        if self.total() == 0.0 {
            return Err(WeightError::Degenerate);
        }
        Ok(self)
    }

    /// Sum of the four weights.
    pub fn total(self) -> f64 {
        self.cost + self.power + self.distance + self.duration
    }

    fn has_finite_non_negative_values(self) -> bool {
        [self.cost, self.power, self.distance, self.duration]
            .into_iter()
            .all(|w| w.is_finite() && w >= 0.0)
    }
}

impl Default for WeightVector {
    /// Equal weighting of all four metrics.
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}
