//! Step-response figures of a finished run.
//!
//! All figures are read off the discrete trajectory; the "final value" is the
//! last sample, so a loop that is still oscillating at the end of the horizon
//! reports wherever it happened to stop.

use loopsim_core::Trajectory;
use uom::si::{f64::Time, time::second};

/// Fraction of the final value that counts as "risen".
pub const RISE_FRACTION: f64 = 0.9;

/// Summary of a setpoint step response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMetrics {
    /// Process value at the last sample.
    pub final_value: f64,

    /// Largest excursion of the process value in the direction of the final value.
    pub peak: f64,

    /// First time the process value reaches [`RISE_FRACTION`] of the final
    /// value. `None` when the final value is zero.
    pub rise_time: Option<Time>,

    /// `(peak - final) / final * 100`, in percent. `None` when the final value
    /// is zero.
    pub overshoot: Option<f64>,

    /// `|setpoint - final|`.
    pub steady_state_error: f64,
}

impl StepMetrics {
    /// Computes the metrics of `trajectory` against `setpoint`.
    ///
    /// Returns `None` for an empty trajectory or one whose final value is not
    /// finite.
    #[must_use]
    pub fn from_trajectory(trajectory: &Trajectory, setpoint: f64) -> Option<Self> {
        let final_value = *trajectory.output.last()?;
        if !final_value.is_finite() {
            return None;
        }

        // Work in the direction of travel so a negative step mirrors a positive one.
        let sign = if final_value < 0.0 { -1.0 } else { 1.0 };
        let target = sign * final_value;

        let peak = sign
            * trajectory
                .output
                .iter()
                .map(|y| sign * y)
                .fold(target, f64::max);

        let (rise_time, overshoot) = if final_value == 0.0 {
            (None, None)
        } else {
            let rise_time = trajectory
                .output
                .iter()
                .zip(&trajectory.time)
                .find(|(y, _)| sign * **y >= RISE_FRACTION * target)
                .map(|(_, t)| Time::new::<second>(*t));
            let overshoot = (sign * peak - target) / target * 100.0;
            (rise_time, Some(overshoot))
        };

        Some(Self {
            final_value,
            peak,
            rise_time,
            overshoot,
            steady_state_error: (setpoint - final_value).abs(),
        })
    }
}
