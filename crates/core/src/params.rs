use uom::si::{f64::Time, time::second};

use crate::{
    controller::{ClassicPid, ControllerModel},
    plant::PlantModel,
};

/// Raw simulation parameters as a caller supplies them.
///
/// This is the unvalidated counterpart of
/// [`SimulationConfig`](crate::SimulationConfig): a flat set of values that a
/// parameter panel or a config file can fill in. Convert it with
/// `SimulationConfig::try_from(params)` to validate it.
///
/// The defaults describe a heated furnace with a large dead time: a classic
/// PID (`Kp = 2`, `Ti = 10 s`, `Td = 0.5 s`) on a plant with `K = 5`,
/// `T = 50 s`, `L = 10 s`, a setpoint of 100 and a 300 s horizon sampled every
/// 0.5 s.
///
/// With the `serde` feature, every field is optional when deserializing and
/// falls back to its default. Times are given in seconds.
///
/// ```toml
/// setpoint = 80.0
/// dead_time = 15.0
///
/// [controller]
/// type = "classic"
/// kp = 1.2
/// ti = 20.0
/// td = 0.0
///
/// [plant]
/// type = "first_order"
/// gain = 5.0
/// time_constant = 50.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SimulationParams {
    pub controller: ControllerModel,
    pub plant: PlantModel,
    pub dead_time: Time,
    pub setpoint: f64,
    pub total_time: Time,
    pub dt: Time,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let s = |value: f64| Time::new::<second>(value);
        Self {
            controller: ControllerModel::Classic(ClassicPid::new(2.0, s(10.0), s(0.5))),
            plant: PlantModel::FirstOrder {
                gain: 5.0,
                time_constant: s(50.0),
            },
            dead_time: s(10.0),
            setpoint: 100.0,
            total_time: s(300.0),
            dt: s(0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{ConfigError, SimulationConfig, constraint::ConstraintError};

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::try_from(SimulationParams::default()).unwrap();
        assert_eq!(config.step_count(), 600);
        assert_eq!(config.delay_steps(), 20);
    }

    #[test]
    fn round_trips_through_config() {
        let params = SimulationParams {
            setpoint: 42.0,
            ..SimulationParams::default()
        };
        let config = SimulationConfig::try_from(params).unwrap();
        assert_eq!(SimulationParams::from(config), params);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = SimulationParams {
            dt: Time::new::<second>(0.0),
            ..SimulationParams::default()
        };
        assert_eq!(
            SimulationConfig::try_from(params).unwrap_err(),
            ConfigError::SampleInterval(ConstraintError::Zero)
        );
    }
}
