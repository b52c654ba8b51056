use uom::si::{f64::Time, time::second};

use super::{ControllerState, integral_term, saturate};

/// Classic PID whose gains are scheduled on how large the error is.
///
/// A single membership grade `μ = min(|e| / error_span, 1)` says how "large"
/// the current error is, from `0` (small) to `1` (large). The gains follow a
/// common fuzzy self-tuning rule base:
///
/// - large error: more proportional action, no integration, less derivative;
/// - small error: softer proportional action, full integration.
///
/// ```text
/// Kp' = Kp * (1 + adaptation * (μ - 0.5))
/// ∫e += (1 - μ) * e * dt
/// D'  = (1 - adaptation * μ / 2) * de/dt
/// ```
///
/// With `adaptation = 0` and an `error_span` much larger than any error the
/// law behaves like [`ClassicPid`](super::ClassicPid). The integral clamp and
/// integral-time cutoff match the classic law.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyPid {
    pub kp: f64,
    pub ti: Time,
    pub td: Time,

    /// Error magnitude at and above which the error counts as fully large.
    pub error_span: f64,

    /// Strength of the gain scheduling; `0` disables proportional and
    /// derivative scheduling.
    pub adaptation: f64,
}

impl FuzzyPid {
    /// Returns the membership grade of `error` in the "large error" set.
    #[must_use]
    pub fn membership(&self, error: f64) -> f64 {
        (error.abs() / self.error_span).min(1.0)
    }

    /// Computes one saturated command and updates `state`.
    #[must_use]
    pub fn command(&self, state: &mut ControllerState, error: f64, dt: Time) -> f64 {
        let dt = dt.get::<second>();
        let mu = self.membership(error);

        let kp = self.kp * (1.0 + self.adaptation * (mu - 0.5));
        state.accumulate((1.0 - mu) * error * dt);
        let derivative =
            (1.0 - self.adaptation * mu / 2.0) * (error - state.previous_error) / dt;

        let integral = integral_term(state.integral, self.ti.get::<second>());
        let raw = kp * (error + integral + self.td.get::<second>() * derivative);

        let command = saturate(raw);
        state.record(error, command);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::controller::ClassicPid;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn fuzzy(error_span: f64, adaptation: f64) -> FuzzyPid {
        FuzzyPid {
            kp: 2.0,
            ti: seconds(10.0),
            td: seconds(0.5),
            error_span,
            adaptation,
        }
    }

    #[test]
    fn membership_saturates_at_span() {
        let pid = fuzzy(20.0, 1.0);
        assert_relative_eq!(pid.membership(0.0), 0.0);
        assert_relative_eq!(pid.membership(-5.0), 0.25);
        assert_relative_eq!(pid.membership(20.0), 1.0);
        assert_relative_eq!(pid.membership(300.0), 1.0);
    }

    #[test]
    fn reduces_to_classic_without_scheduling() {
        let fuzzy = fuzzy(1e12, 0.0);
        let classic = ClassicPid::new(2.0, seconds(10.0), seconds(0.5));

        let mut fuzzy_state = ControllerState::default();
        let mut classic_state = ControllerState::default();

        for error in [3.0, 2.5, 1.0, -0.5, 0.25] {
            let a = fuzzy.command(&mut fuzzy_state, error, seconds(0.5));
            let b = classic.command(&mut classic_state, error, seconds(0.5));
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn large_error_freezes_integral() {
        let pid = fuzzy(10.0, 1.0);
        let mut state = ControllerState::default();

        for _ in 0..10 {
            let _ = pid.command(&mut state, 50.0, seconds(0.5));
        }
        assert_relative_eq!(state.integral(), 0.0);
    }

    #[test]
    fn large_error_boosts_proportional_action() {
        // Td = 0 and Ti disabled isolate the proportional path.
        let pid = FuzzyPid {
            kp: 1.0,
            ti: seconds(0.0),
            td: seconds(0.0),
            error_span: 10.0,
            adaptation: 1.0,
        };

        let mut state = ControllerState::default();
        let large = pid.command(&mut state, 10.0, seconds(1.0));

        let mut state = ControllerState::default();
        let small = pid.command(&mut state, 1.0, seconds(1.0));

        // μ = 1 gives Kp' = 1.5; μ = 0.1 gives Kp' = 0.6.
        assert_relative_eq!(large, 15.0, epsilon = 1e-12);
        assert_relative_eq!(small, 0.6, epsilon = 1e-12);
    }
}
