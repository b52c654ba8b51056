use uom::si::{f64::Time, time::second};

use super::{ControllerState, integral_term, saturate};

/// Positional PID in the ideal (ISA) form.
///
/// ```text
/// u = Kp * (e + (1/Ti) * ∫e dt + Td * de/dt)
/// ```
///
/// Sampled with rectangular integration and a backward-difference derivative.
/// The integral is hard-clamped to `±INTEGRAL_LIMIT` after every update, and
/// an integral time at or below `INTEGRAL_TIME_CUTOFF` disables the integral
/// term entirely.
///
/// # Example
///
/// ```
/// use loopsim_core::controller::{ClassicPid, ControllerState};
/// use uom::si::{f64::Time, time::second};
///
/// let pid = ClassicPid::new(
///     2.0,
///     Time::new::<second>(10.0),
///     Time::new::<second>(0.0),
/// );
/// let mut state = ControllerState::default();
///
/// // e = 10, ∫e = 5, u = 2 * (10 + 5/10) = 21
/// let u = pid.command(&mut state, 10.0, Time::new::<second>(0.5));
/// assert!((u - 21.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassicPid {
    pub kp: f64,
    pub ti: Time,
    pub td: Time,
}

impl ClassicPid {
    /// Creates a classic PID from proportional gain, integral time and derivative time.
    #[must_use]
    pub fn new(kp: f64, ti: Time, td: Time) -> Self {
        Self { kp, ti, td }
    }

    /// Computes one saturated command and updates `state`.
    #[must_use]
    pub fn command(&self, state: &mut ControllerState, error: f64, dt: Time) -> f64 {
        let dt = dt.get::<second>();

        state.accumulate(error * dt);
        let derivative = (error - state.previous_error) / dt;

        let integral = integral_term(state.integral, self.ti.get::<second>());
        let raw = self.kp * (error + integral + self.td.get::<second>() * derivative);

        let command = saturate(raw);
        state.record(error, command);
        command
    }
}
