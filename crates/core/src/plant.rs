//! Process models driven by the controller.
//!
//! A [`Plant`] pairs lag dynamics ([`PlantModel`]) with a pure transport delay.
//! The delay itself is applied by the simulator, which feeds the plant the
//! control value from `dead_time` seconds ago; this module only covers the lag.

use uom::si::{f64::Time, time::second};

/// Lag dynamics of the controlled process.
///
/// Both variants are discretized with explicit Euler, so each lag `T` is
/// stable only while `dt / T < 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum PlantModel {
    /// Single lag: `T * dy/dt + y = K * u`.
    FirstOrder { gain: f64, time_constant: Time },

    /// Two cascaded lags with time constants `T1` and `T2`.
    SecondOrder {
        gain: f64,
        lag: Time,
        second_lag: Time,
    },
}

/// A process: lag dynamics plus pure transport delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plant {
    pub model: PlantModel,
    pub dead_time: Time,
}

/// Lag state of a plant between two samples.
///
/// `inner` holds the first stage of a second-order plant and stays at zero for
/// a first-order plant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlantState {
    inner: f64,
    output: f64,
}

/// A [`PlantModel`] with its coefficients fixed for one sample interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscretePlant {
    FirstOrder {
        gain: f64,
        ratio: f64,
    },
    SecondOrder {
        gain: f64,
        ratio: f64,
        second_ratio: f64,
    },
}

impl Plant {
    /// Creates a first-order-plus-dead-time plant.
    #[must_use]
    pub fn fopdt(gain: f64, time_constant: Time, dead_time: Time) -> Self {
        Self {
            model: PlantModel::FirstOrder {
                gain,
                time_constant,
            },
            dead_time,
        }
    }

    /// Returns `self` with the given dead time, keeping the lag model unchanged.
    #[must_use]
    pub fn with_dead_time(self, dead_time: Time) -> Self {
        Self { dead_time, ..self }
    }
}

impl PlantModel {
    /// Returns the steady-state gain `K`.
    #[must_use]
    pub fn gain(&self) -> f64 {
        match *self {
            Self::FirstOrder { gain, .. } | Self::SecondOrder { gain, .. } => gain,
        }
    }

    /// Returns every lag time constant, first stage first.
    pub fn lags(&self) -> impl Iterator<Item = Time> {
        let (first, rest) = match *self {
            Self::FirstOrder { time_constant, .. } => (time_constant, None),
            Self::SecondOrder {
                lag, second_lag, ..
            } => (lag, Some(second_lag)),
        };
        std::iter::once(first).chain(rest)
    }

    /// Returns the `dt / T` ratio of every lag, first stage first.
    pub fn lag_ratios(&self, dt: Time) -> impl Iterator<Item = f64> {
        self.lags().map(move |lag| ratio(dt, lag))
    }

    /// Fixes the update coefficients for the sample interval `dt`.
    #[must_use]
    pub fn discretize(&self, dt: Time) -> DiscretePlant {
        match *self {
            Self::FirstOrder {
                gain,
                time_constant,
            } => DiscretePlant::FirstOrder {
                gain,
                ratio: ratio(dt, time_constant),
            },
            Self::SecondOrder {
                gain,
                lag,
                second_lag,
            } => DiscretePlant::SecondOrder {
                gain,
                ratio: ratio(dt, lag),
                second_ratio: ratio(dt, second_lag),
            },
        }
    }
}

impl DiscretePlant {
    /// Advances the lag state by one sample with the given (already delayed) input.
    ///
    /// First order: `y[i] = (dt/T) * K * u + (1 - dt/T) * y[i-1]`.
    ///
    /// Second order runs the same recursion twice: the first stage sees
    /// `K * u`, the second stage sees the first stage's fresh value.
    #[must_use]
    pub fn advance(&self, state: PlantState, input: f64) -> PlantState {
        match *self {
            Self::FirstOrder { gain, ratio } => PlantState {
                inner: 0.0,
                output: ratio * gain * input + (1.0 - ratio) * state.output,
            },
            Self::SecondOrder {
                gain,
                ratio,
                second_ratio,
            } => {
                let inner = ratio * gain * input + (1.0 - ratio) * state.inner;
                let output = second_ratio * inner + (1.0 - second_ratio) * state.output;
                PlantState { inner, output }
            }
        }
    }
}

impl PlantState {
    /// Returns the process value (PV).
    #[must_use]
    pub fn output(&self) -> f64 {
        self.output
    }
}

fn ratio(dt: Time, lag: Time) -> f64 {
    dt.get::<second>() / lag.get::<second>()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn step_response(plant: &DiscretePlant, input: f64, steps: usize) -> Vec<f64> {
        let mut state = PlantState::default();
        (0..steps)
            .map(|_| {
                state = plant.advance(state, input);
                state.output()
            })
            .collect()
    }

    #[test]
    fn first_order_matches_closed_form() {
        let model = PlantModel::FirstOrder {
            gain: 2.0,
            time_constant: seconds(10.0),
        };
        let plant = model.discretize(seconds(0.5));

        let response = step_response(&plant, 3.0, 40);

        // y[n] = K * u * (1 - (1 - dt/T)^n)
        for (i, y) in response.iter().enumerate() {
            let n = i32::try_from(i + 1).unwrap();
            let expected = 6.0 * (1.0 - 0.95_f64.powi(n));
            assert_relative_eq!(*y, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_input_keeps_zero_state() {
        let plant = PlantModel::FirstOrder {
            gain: 5.0,
            time_constant: seconds(50.0),
        }
        .discretize(seconds(0.5));

        assert!(step_response(&plant, 0.0, 10).iter().all(|y| *y == 0.0));
    }

    #[test]
    fn second_order_lags_behind_first_order() {
        let first = PlantModel::FirstOrder {
            gain: 1.0,
            time_constant: seconds(5.0),
        }
        .discretize(seconds(0.1));
        let second_order = PlantModel::SecondOrder {
            gain: 1.0,
            lag: seconds(5.0),
            second_lag: seconds(2.0),
        }
        .discretize(seconds(0.1));

        let fast = step_response(&first, 1.0, 200);
        let slow = step_response(&second_order, 1.0, 200);

        for (a, b) in fast.iter().zip(&slow) {
            assert!(b < a, "second-order output {b} should trail {a}");
        }

        // Both settle on the same gain.
        let settled_first = step_response(&first, 1.0, 5000);
        let settled_second = step_response(&second_order, 1.0, 5000);
        assert_relative_eq!(settled_first[4999], 1.0, epsilon = 1e-6);
        assert_relative_eq!(settled_second[4999], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn lag_ratios_follow_stage_order() {
        let model = PlantModel::SecondOrder {
            gain: 1.0,
            lag: seconds(4.0),
            second_lag: seconds(0.5),
        };

        let ratios: Vec<f64> = model.lag_ratios(seconds(1.0)).collect();
        assert_eq!(ratios, vec![0.25, 2.0]);
        assert_relative_eq!(model.gain(), 1.0);
    }

    #[test]
    fn lags_list_every_stage() {
        let first_order = PlantModel::FirstOrder {
            gain: 1.0,
            time_constant: seconds(50.0),
        };
        let lags: Vec<f64> = first_order.lags().map(|lag| lag.get::<second>()).collect();
        assert_eq!(lags, vec![50.0]);

        let second_order = PlantModel::SecondOrder {
            gain: 1.0,
            lag: seconds(30.0),
            second_lag: seconds(5.0),
        };
        let lags: Vec<f64> = second_order.lags().map(|lag| lag.get::<second>()).collect();
        assert_eq!(lags, vec![30.0, 5.0]);
    }

    #[test]
    fn fopdt_constructor() {
        let plant = Plant::fopdt(5.0, seconds(50.0), seconds(10.0));
        assert_eq!(plant.model.lags().count(), 1);
        assert_relative_eq!(plant.dead_time.get::<second>(), 10.0);

        let no_delay = plant.with_dead_time(seconds(0.0));
        assert_relative_eq!(no_delay.dead_time.get::<second>(), 0.0);
    }
}
