//! Shared fixtures for the loopsim integration tests.

use loopsim_core::{SimulationConfig, SimulationParams};

/// The furnace loop every scenario starts from, written as a TOML file.
pub const FURNACE_TOML: &str = r#"
setpoint = 100.0
total_time = 300.0
dt = 0.5
dead_time = 10.0

[controller]
type = "classic"
kp = 2.0
ti = 10.0
td = 0.5

[plant]
type = "first_order"
gain = 5.0
time_constant = 50.0
"#;

/// Parses simulation parameters from TOML.
///
/// # Errors
///
/// Returns the parse error if `source` is not a valid parameter file.
pub fn params_from_toml(source: &str) -> Result<SimulationParams, toml::de::Error> {
    toml::from_str(source)
}

/// Builds a validated configuration from defaults with a few overrides.
///
/// # Panics
///
/// Panics if the resulting parameters are not runnable.
#[must_use]
pub fn config_with(update: impl FnOnce(&mut SimulationParams)) -> SimulationConfig {
    let mut params = SimulationParams::default();
    update(&mut params);
    SimulationConfig::try_from(params).expect("fixture parameters must be valid")
}
