use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::second,
};

use super::{ControllerState, saturate};

/// Velocity-form (incremental) PID.
///
/// Instead of computing the command directly, each sample computes a change
/// in command from the last three errors:
///
/// ```text
/// Δu[i] = Kp * (e[i] - e[i-1]) + Ki * e[i] * dt + Kd * (e[i] - 2 e[i-1] + e[i-2]) / dt
/// u[i]  = clamp(u[i-1] + Δu[i], 0, 100)
/// ```
///
/// Because the increment is applied to the already-saturated previous command,
/// the law cannot wind up and needs no separate integral clamp. Errors before
/// the first sample are taken as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncrementalPid {
    pub kp: f64,
    pub ki: Frequency,
    pub kd: Time,
}

impl IncrementalPid {
    /// Creates an incremental PID from parallel-form gains.
    #[must_use]
    pub fn new(kp: f64, ki: Frequency, kd: Time) -> Self {
        Self { kp, ki, kd }
    }

    /// Computes one saturated command and updates `state`.
    #[must_use]
    pub fn command(&self, state: &mut ControllerState, error: f64, dt: Time) -> f64 {
        let dt = dt.get::<second>();
        let ControllerState {
            previous_error,
            error_before_last,
            previous_command,
            ..
        } = *state;

        let proportional = self.kp * (error - previous_error);
        let integral = self.ki.get::<hertz>() * error * dt;
        let derivative =
            self.kd.get::<second>() * (error - 2.0 * previous_error + error_before_last) / dt;

        let command = saturate(previous_command + proportional + integral + derivative);
        state.record(error, command);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn gains(kp: f64, ki: f64, kd: f64) -> IncrementalPid {
        IncrementalPid::new(kp, Frequency::new::<hertz>(ki), Time::new::<second>(kd))
    }

    fn dt() -> Time {
        Time::new::<second>(0.5)
    }

    #[test]
    fn first_steps_match_closed_form() {
        let pid = gains(2.0, 0.4, 1.0);
        let mut state = ControllerState::default();

        // Δu1 = 2 * 10 + 0.4 * 10 * 0.5 + 1 * 10 / 0.5 = 20 + 2 + 20 = 42
        assert_relative_eq!(pid.command(&mut state, 10.0, dt()), 42.0, epsilon = 1e-12);

        // Δu2 = 2 * (8 - 10) + 0.4 * 8 * 0.5 + 1 * (8 - 20 + 0) / 0.5 = -4 + 1.6 - 24
        assert_relative_eq!(
            pid.command(&mut state, 8.0, dt()),
            42.0 - 26.4,
            epsilon = 1e-12
        );

        // Δu3 = 2 * (7 - 8) + 0.4 * 7 * 0.5 + 1 * (7 - 16 + 10) / 0.5 = -2 + 1.4 + 2
        assert_relative_eq!(
            pid.command(&mut state, 7.0, dt()),
            15.6 + 1.4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn constant_error_ramps_with_integral_gain_only() {
        let pid = gains(5.0, 1.0, 0.0);
        let mut state = ControllerState::default();

        // The proportional kick happens once, afterwards only Ki * e * dt remains.
        let kick = pid.command(&mut state, 2.0, dt());
        let ramp = pid.command(&mut state, 2.0, dt());
        let further = pid.command(&mut state, 2.0, dt());

        assert_relative_eq!(kick, 11.0);
        assert_relative_eq!(ramp - kick, 1.0);
        assert_relative_eq!(further - ramp, 1.0);
    }

    #[test]
    fn saturated_command_recovers_immediately() {
        let pid = gains(1.0, 1.0, 0.0);
        let mut state = ControllerState::default();

        for _ in 0..50 {
            let _ = pid.command(&mut state, 100.0, dt());
        }
        assert_relative_eq!(state.previous_command(), 100.0);

        // A sign change in error pulls the command off the limit on the next sample.
        let next = pid.command(&mut state, -10.0, dt());
        assert!(next < 100.0);
    }
}
