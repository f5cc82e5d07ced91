//! Per-candidate physical and economic metrics.
//!
//! Everything here is specific to the requesting vehicle and subscription:
//! the effective charging power a connector can deliver into this vehicle,
//! the energy the mode's charging model calls for, and the session cost and
//! charging duration that follow.

use voltside_core::{
    CatalogError, ChargingMode, Leg, StationRecord, SubscriptionPlan, TravelView, TripContext,
    VehicleProfile,
};

/// Fixed en-route top-up energy in kWh.
///
/// En-route stops are compared on a common representative top-up rather
/// than the actual battery state, so a farther station is not penalized
/// with an inflated energy need.
const EN_ROUTE_TOP_UP_KWH: f64 = 15.0;

/// Reference maximum range in km assumed for every vehicle model when
/// estimating the battery level on arrival.
const REFERENCE_RANGE_KM: f64 = 350.0;

/// One filtered row with its derived metrics attached.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<'a> {
    /// The underlying catalog row.
    pub record: &'a StationRecord,
    /// Travel leg on the mode's basis.
    pub leg: Leg,
    /// Effective charging power in kW; `0` when the connector is unusable.
    pub effective_power_kw: f64,
    /// Energy to charge in kWh.
    pub energy_kwh: f64,
    /// Session cost in CHF; `None` for an unusable connector.
    pub cost_chf: Option<f64>,
    /// Charging duration in minutes; `None` for an unusable connector.
    pub charge_duration_min: Option<f64>,
}

/// Round to two decimals.
#[expect(clippy::float_arithmetic, reason = "decimal rounding of a metric")]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Effective charging power of a connector for a vehicle, in kW, rounded to
/// two decimals.
///
/// DC power is capped by the vehicle's DC limit and AC power by its AC
/// limit. A single-phase vehicle on a three-phase connector draws one phase,
/// i.e. a third of the rated power. Any combination without a rule — and
/// any plug the vehicle cannot physically use, which callers check
/// separately — yields `0`: the connector stays listed but is unusable.
///
/// # Examples
/// ```
/// use voltside_core::{PowerType, VehicleProfile};
/// use voltside_scorer::effective_power_kw;
///
/// let vehicle = VehicleProfile::new(69.0, 124.0, 11.0, 3, ["CCS"]);
/// assert_eq!(effective_power_kw(PowerType::Dc, 150.0, &vehicle), 124.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the power table divides and caps kW quantities"
)]
pub fn effective_power_kw(
    power_type: voltside_core::PowerType,
    rated_kw: f64,
    vehicle: &VehicleProfile,
) -> f64 {
    use voltside_core::PowerType::{AcSinglePhase, AcThreePhase, Dc};

    let raw = match (power_type, vehicle.phase_count) {
        (Dc, _) => rated_kw.min(vehicle.max_power_dc_kw),
        (AcThreePhase, 3) => rated_kw.min(vehicle.max_power_ac_kw),
        (AcThreePhase, 1) => rated_kw / 3.0,
        (AcSinglePhase, _) => rated_kw.min(vehicle.max_power_ac_kw),
        _ => 0.0,
    };
    round2(raw)
}

/// Energy to charge in kWh under the mode's charging model.
///
/// En-route stops use the fixed top-up. Near-start and destination charging
/// estimate the battery level implied on arrival at the station, assuming
/// the fixed reference range for every model, and refill to full. The
/// result is clamped at zero: a remaining range beyond the reference range
/// would otherwise produce a negative energy need.
#[expect(
    clippy::float_arithmetic,
    reason = "the arrival-state model scales the battery capacity"
)]
pub(crate) fn energy_to_charge_kwh(
    mode: ChargingMode,
    remaining_range_km: f64,
    distance_to_station_km: f64,
    battery_capacity_kwh: f64,
) -> f64 {
    match mode {
        ChargingMode::EnRoute => EN_ROUTE_TOP_UP_KWH,
        ChargingMode::NearStart | ChargingMode::Destination => {
            let range_on_arrival_km = remaining_range_km - distance_to_station_km;
            let fraction_needed = (REFERENCE_RANGE_KM - range_on_arrival_km) / REFERENCE_RANGE_KM;
            (fraction_needed * battery_capacity_kwh).max(0.0)
        }
    }
}

/// Session cost in CHF, rounded to two decimals.
#[expect(
    clippy::float_arithmetic,
    reason = "tariff arithmetic over energy, time, and the session fee"
)]
pub(crate) fn session_cost_chf(
    energy_kwh: f64,
    effective_power_kw: f64,
    plan: SubscriptionPlan,
) -> f64 {
    let minutes = energy_kwh / effective_power_kw * 60.0;
    round2(energy_kwh * plan.price_per_kwh + minutes * plan.price_per_minute + plan.start_fee)
}

/// Charging duration in minutes, rounded to whole minutes.
#[expect(clippy::float_arithmetic, reason = "duration follows energy over power")]
pub(crate) fn charge_duration_min(energy_kwh: f64, effective_power_kw: f64) -> f64 {
    (energy_kwh / effective_power_kw * 60.0).round()
}

/// Attach metrics to every filtered row.
///
/// # Errors
/// Returns [`CatalogError`] when a basis leg is missing, which validated
/// snapshots rule out.
#[expect(
    clippy::float_arithmetic,
    reason = "converts the basis distance to kilometres"
)]
pub(crate) fn compute<'a>(
    rows: &[&'a StationRecord],
    view: &TravelView<'_>,
    trip: &TripContext,
    vehicle: &VehicleProfile,
    plan: SubscriptionPlan,
) -> Result<Vec<Candidate<'a>>, CatalogError> {
    let mut candidates = Vec::with_capacity(rows.len());
    for &record in rows {
        let leg = *view.basis_leg(record)?;
        let effective = if vehicle.supports(&record.plug) {
            effective_power_kw(record.power_type, record.power_kw, vehicle)
        } else {
            0.0
        };
        let energy = energy_to_charge_kwh(
            trip.mode,
            trip.remaining_range_km,
            leg.distance_m / 1000.0,
            vehicle.battery_capacity_kwh,
        );
        let usable = effective > 0.0;
        candidates.push(Candidate {
            record,
            leg,
            effective_power_kw: effective,
            energy_kwh: energy,
            cost_chf: usable.then(|| session_cost_chf(energy, effective, plan)),
            charge_duration_min: usable.then(|| charge_duration_min(energy, effective)),
        });
    }
    Ok(candidates)
}
