//! Validated description of one simulation run.

use thiserror::Error;
use uom::si::{f64::Time, frequency::hertz, time::second};

use crate::{
    constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive},
    controller::ControllerModel,
    diagnostic::Warning,
    params::SimulationParams,
    plant::Plant,
};

/// Relative tolerance when checking whether the dead time sits on the sample grid.
const GRID_TOLERANCE: f64 = 1e-9;

/// Largest number of samples a single run may hold.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Immutable, validated input for one closed-loop run.
///
/// A `SimulationConfig` can only be built through [`SimulationConfig::new`] (or
/// from [`SimulationParams`]), which rejects every configuration the simulator
/// cannot run. Holding one means the run will produce a full trajectory.
///
/// # Example
///
/// ```
/// use loopsim_core::{
///     SimulationConfig,
///     controller::ClassicPid,
///     plant::Plant,
/// };
/// use uom::si::{f64::Time, time::second};
///
/// let s = |value: f64| Time::new::<second>(value);
/// let config = SimulationConfig::new(
///     ClassicPid::new(2.0, s(10.0), s(0.5)),
///     Plant::fopdt(5.0, s(50.0), s(10.0)),
///     100.0,
///     s(300.0),
///     s(0.5),
/// )
/// .unwrap();
///
/// assert_eq!(config.step_count(), 600);
/// assert_eq!(config.delay_steps(), 20);
/// assert!(config.warnings().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SimulationParams", into = "SimulationParams")
)]
pub struct SimulationConfig {
    controller: ControllerModel,
    plant: Plant,
    setpoint: f64,
    total_time: Constrained<Time, StrictlyPositive>,
    dt: Constrained<Time, StrictlyPositive>,
}

/// Errors raised when a simulation configuration cannot be run.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("sample interval: {0}")]
    SampleInterval(#[source] ConstraintError),

    #[error("total time: {0}")]
    Horizon(#[source] ConstraintError),

    #[error("plant time constant: {0}")]
    TimeConstant(#[source] ConstraintError),

    #[error("dead time: {0}")]
    DeadTime(#[source] ConstraintError),

    #[error("error span: {0}")]
    ErrorSpan(#[source] ConstraintError),

    #[error("sample interval of {dt} s exceeds the total time of {total_time} s")]
    StepExceedsHorizon { dt: f64, total_time: f64 },

    #[error("{steps} samples exceed the limit of {max} per run", max = MAX_SAMPLES)]
    TooManySamples { steps: f64 },

    #[error("{0} must be finite")]
    NotFinite(&'static str),
}

impl SimulationConfig {
    /// Validates and creates a configuration.
    ///
    /// A non-positive integral time is accepted: it disables the integral term.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `dt` or `total_time` is not strictly
    /// positive, `dt` exceeds `total_time`, a plant time constant is not
    /// strictly positive, the dead time is negative, a fuzzy controller's
    /// error span is not strictly positive, the run would need more than
    /// [`MAX_SAMPLES`] samples, or any parameter is not finite.
    pub fn new(
        controller: impl Into<ControllerModel>,
        plant: Plant,
        setpoint: f64,
        total_time: Time,
        dt: Time,
    ) -> Result<Self, ConfigError> {
        let controller = controller.into();

        let dt = StrictlyPositive::new(dt).map_err(ConfigError::SampleInterval)?;
        let total_time = StrictlyPositive::new(total_time).map_err(ConfigError::Horizon)?;
        let dt_s = finite(dt.as_ref().get::<second>(), "dt")?;
        let total_s = finite(total_time.as_ref().get::<second>(), "total_time")?;
        if dt_s > total_s {
            return Err(ConfigError::StepExceedsHorizon {
                dt: dt_s,
                total_time: total_s,
            });
        }
        let steps = (total_s / dt_s).floor();
        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_SAMPLES as f64;
        if steps > limit {
            return Err(ConfigError::TooManySamples { steps });
        }

        finite(plant.model.gain(), "gain")?;
        for lag in plant.model.lags() {
            let lag = StrictlyPositive::new(lag).map_err(ConfigError::TimeConstant)?;
            finite(lag.as_ref().get::<second>(), "time_constant")?;
        }
        let dead_time = NonNegative::new(plant.dead_time).map_err(ConfigError::DeadTime)?;
        finite(dead_time.as_ref().get::<second>(), "dead_time")?;

        check_controller(&controller)?;
        finite(setpoint, "setpoint")?;

        Ok(Self {
            controller,
            plant,
            setpoint,
            total_time,
            dt,
        })
    }

    /// Returns the controller law.
    #[must_use]
    pub fn controller(&self) -> &ControllerModel {
        &self.controller
    }

    /// Returns the plant.
    #[must_use]
    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    /// Returns the setpoint held for the whole run.
    #[must_use]
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Returns the horizon length.
    #[must_use]
    pub fn total_time(&self) -> Time {
        *self.total_time.as_ref()
    }

    /// Returns the sample interval.
    #[must_use]
    pub fn dt(&self) -> Time {
        *self.dt.as_ref()
    }

    /// Returns the number of samples, `floor(total_time / dt)`, at most
    /// [`MAX_SAMPLES`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn step_count(&self) -> usize {
        (self.total_time().get::<second>() / self.dt().get::<second>()).floor() as usize
    }

    /// Returns the dead time in whole samples, `floor(dead_time / dt)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn delay_steps(&self) -> usize {
        (self.plant.dead_time.get::<second>() / self.dt().get::<second>()).floor() as usize
    }

    /// Returns the advisory warnings for this configuration.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        let dt = self.dt();

        let mut warnings: Vec<Warning> = self
            .plant
            .model
            .lags()
            .zip(self.plant.model.lag_ratios(dt))
            .filter(|(_, ratio)| *ratio >= 1.0)
            .map(|(lag, ratio)| Warning::NumericalInstability { lag, ratio })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let effective = dt * self.delay_steps() as f64;
        let requested = self.plant.dead_time;
        let gap = (requested - effective).get::<second>();
        let scale = requested.get::<second>().max(dt.get::<second>());
        if gap.abs() > GRID_TOLERANCE * scale {
            warnings.push(Warning::DelayQuantized {
                requested,
                effective,
            });
        }

        warnings
    }
}

impl TryFrom<SimulationParams> for SimulationConfig {
    type Error = ConfigError;

    fn try_from(params: SimulationParams) -> Result<Self, Self::Error> {
        let SimulationParams {
            controller,
            plant,
            dead_time,
            setpoint,
            total_time,
            dt,
        } = params;

        Self::new(
            controller,
            Plant {
                model: plant,
                dead_time,
            },
            setpoint,
            total_time,
            dt,
        )
    }
}

impl From<SimulationConfig> for SimulationParams {
    fn from(config: SimulationConfig) -> Self {
        Self {
            controller: config.controller,
            plant: config.plant.model,
            dead_time: config.plant.dead_time,
            setpoint: config.setpoint,
            total_time: config.total_time(),
            dt: config.dt(),
        }
    }
}

fn finite(value: f64, name: &'static str) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite(name))
    }
}

fn check_controller(controller: &ControllerModel) -> Result<(), ConfigError> {
    match controller {
        ControllerModel::Classic(pid) => {
            finite(pid.kp, "kp")?;
            finite(pid.ti.get::<second>(), "ti")?;
            finite(pid.td.get::<second>(), "td")?;
        }
        ControllerModel::Incremental(pid) => {
            finite(pid.kp, "kp")?;
            finite(pid.ki.get::<hertz>(), "ki")?;
            finite(pid.kd.get::<second>(), "kd")?;
        }
        ControllerModel::FuzzyApprox(pid) => {
            finite(pid.kp, "kp")?;
            finite(pid.ti.get::<second>(), "ti")?;
            finite(pid.td.get::<second>(), "td")?;
            finite(pid.adaptation, "adaptation")?;
            StrictlyPositive::new(pid.error_span).map_err(ConfigError::ErrorSpan)?;
            finite(pid.error_span, "error_span")?;
        }
    }
    Ok(())
}
