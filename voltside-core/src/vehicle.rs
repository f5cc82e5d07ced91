//! Vehicle charging profiles and the fixed model lookup table.

use std::collections::{BTreeMap, BTreeSet};

/// Charging capabilities of one vehicle model.
///
/// Immutable once the model is chosen; the ranking pipeline only reads it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    /// Usable battery capacity in kWh.
    pub battery_capacity_kwh: f64,
    /// Maximum DC charging power in kW.
    pub max_power_dc_kw: f64,
    /// Maximum AC charging power in kW.
    pub max_power_ac_kw: f64,
    /// Number of AC phases the onboard charger uses (1 or 3).
    pub phase_count: u8,
    /// Connector types the vehicle can plug into.
    pub supported_plugs: BTreeSet<String>,
}

impl VehicleProfile {
    /// Construct a profile from its capability figures.
    pub fn new<I, S>(
        battery_capacity_kwh: f64,
        max_power_dc_kw: f64,
        max_power_ac_kw: f64,
        phase_count: u8,
        supported_plugs: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            battery_capacity_kwh,
            max_power_dc_kw,
            max_power_ac_kw,
            phase_count,
            supported_plugs: supported_plugs.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the vehicle can use the given connector type.
    pub fn supports(&self, plug: &str) -> bool {
        self.supported_plugs.contains(plug)
    }
}

/// Lookup table from vehicle model name to its charging profile.
///
/// The table is a fixed external input; the engine only ever looks models
/// up. An unknown model is fatal for a ranking request since nothing can be
/// computed without a profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleCatalog {
    models: BTreeMap<String, VehicleProfile>,
}

impl VehicleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a model profile.
    pub fn insert(&mut self, model: impl Into<String>, profile: VehicleProfile) {
        self.models.insert(model.into(), profile);
    }

    /// Add a model while consuming `self`, enabling chaining.
    pub fn with_model(mut self, model: impl Into<String>, profile: VehicleProfile) -> Self {
        self.insert(model, profile);
        self
    }

    /// Look up a model's profile.
    pub fn lookup(&self, model: &str) -> Option<&VehicleProfile> {
        self.models.get(model)
    }

    /// Iterate over model names in lexicographic order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// The built-in model table the prototype ships with.
    pub fn builtin() -> Self {
        Self::new()
            .with_model(
                "Nissan Leaf",
                VehicleProfile::new(40.0, 50.0, 6.6, 1, ["CHAdeMO", "Kabel Typ 1"]),
            )
            .with_model(
                "Polestar 2 Standard Range",
                VehicleProfile::new(69.0, 124.0, 11.0, 3, ["CCS", "Kabel Typ 2"]),
            )
            .with_model(
                "Renault Zoe R135",
                VehicleProfile::new(52.0, 46.0, 22.0, 3, ["CCS", "Kabel Typ 2"]),
            )
            .with_model(
                "Tesla Model 3 Long Range",
                VehicleProfile::new(75.0, 250.0, 11.0, 3, ["CCS", "Kabel Typ 2", "Tesla"]),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_models_resolve() {
        let catalog = VehicleCatalog::builtin();
        let leaf = catalog.lookup("Nissan Leaf").unwrap();
        assert_eq!(leaf.phase_count, 1);
        assert!(leaf.supports("CHAdeMO"));
        assert!(!leaf.supports("CCS"));
        assert!(catalog.lookup("DeLorean DMC-12").is_none());
    }

    #[test]
    fn custom_models_extend_the_table() {
        let catalog = VehicleCatalog::builtin().with_model(
            "Test Mule",
            VehicleProfile::new(10.0, 20.0, 3.7, 1, ["Haushaltssteckdose"]),
        );
        assert!(catalog.lookup("Test Mule").is_some());
        assert_eq!(catalog.models().count(), 5);
    }
}
