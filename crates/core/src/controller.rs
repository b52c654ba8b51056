//! Controllers that turn the loop error into an actuator command.
//!
//! Every controller law here is sampled: it sees one error value per sample
//! interval and returns one command, already clamped to the actuator range
//! `[ACTUATOR_MIN, ACTUATOR_MAX]`. Memory between samples lives in a
//! [`ControllerState`] owned by the caller, so a [`ControllerModel`] itself is
//! immutable and can be shared freely.

mod classic;
mod fuzzy;
mod incremental;

use uom::si::f64::Time;

pub use classic::ClassicPid;
pub use fuzzy::FuzzyPid;
pub use incremental::IncrementalPid;

/// Lower actuator limit (valve fully closed), in percent.
pub const ACTUATOR_MIN: f64 = 0.0;

/// Upper actuator limit (valve fully open), in percent.
pub const ACTUATOR_MAX: f64 = 100.0;

/// Symmetric hard limit on the accumulated integral of the error.
pub const INTEGRAL_LIMIT: f64 = 100.0;

/// Integral times at or below this many seconds disable the integral term.
pub const INTEGRAL_TIME_CUTOFF: f64 = 0.01;

/// The controller law used in a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ControllerModel {
    /// Positional PID with `Kp`, `Ti`, `Td`.
    Classic(ClassicPid),

    /// Velocity-form PID with `Kp`, `Ki`, `Kd`.
    Incremental(IncrementalPid),

    /// Classic PID with gains scheduled on the error magnitude.
    #[cfg_attr(feature = "serde", serde(rename = "fuzzy"))]
    FuzzyApprox(FuzzyPid),
}

/// Memory a controller carries from one sample to the next.
///
/// Starts from a cold, all-zero state. Not every law uses every field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerState {
    integral: f64,
    previous_error: f64,
    error_before_last: f64,
    previous_command: f64,
}

impl ControllerModel {
    /// Computes the actuator command for the current error sample.
    ///
    /// Updates `state` in place and returns a command in
    /// `[ACTUATOR_MIN, ACTUATOR_MAX]`.
    #[must_use]
    pub fn command(&self, state: &mut ControllerState, error: f64, dt: Time) -> f64 {
        match self {
            Self::Classic(pid) => pid.command(state, error, dt),
            Self::Incremental(pid) => pid.command(state, error, dt),
            Self::FuzzyApprox(pid) => pid.command(state, error, dt),
        }
    }
}

impl From<ClassicPid> for ControllerModel {
    fn from(pid: ClassicPid) -> Self {
        Self::Classic(pid)
    }
}

impl From<IncrementalPid> for ControllerModel {
    fn from(pid: IncrementalPid) -> Self {
        Self::Incremental(pid)
    }
}

impl From<FuzzyPid> for ControllerModel {
    fn from(pid: FuzzyPid) -> Self {
        Self::FuzzyApprox(pid)
    }
}

impl ControllerState {
    /// Returns the accumulated (clamped) integral of the error.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Returns the last command the controller produced.
    #[must_use]
    pub fn previous_command(&self) -> f64 {
        self.previous_command
    }

    /// Adds `increment` to the integral and applies the hard anti-windup clamp.
    fn accumulate(&mut self, increment: f64) {
        self.integral = (self.integral + increment).clamp(-INTEGRAL_LIMIT, INTEGRAL_LIMIT);
    }

    /// Shifts the error history and records the command just issued.
    fn record(&mut self, error: f64, command: f64) {
        self.error_before_last = self.previous_error;
        self.previous_error = error;
        self.previous_command = command;
    }
}

/// Clamps a raw controller output to the actuator range.
///
/// A NaN output can only appear after an unstable plant has overflowed; it is
/// held at the lower limit so the command stays inside the range.
#[must_use]
pub fn saturate(raw: f64) -> f64 {
    if raw.is_nan() {
        ACTUATOR_MIN
    } else {
        raw.clamp(ACTUATOR_MIN, ACTUATOR_MAX)
    }
}

/// Returns `integral / ti`, or zero when `ti` is at or below the cutoff.
fn integral_term(integral: f64, ti_seconds: f64) -> f64 {
    if ti_seconds > INTEGRAL_TIME_CUTOFF {
        integral / ti_seconds
    } else {
        0.0
    }
}
