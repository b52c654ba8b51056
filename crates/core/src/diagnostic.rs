use std::fmt;

use uom::si::{f64::Time, time::second};

/// An advisory finding about a run's configuration.
///
/// Warnings never stop a run. They flag results that reflect the numerical
/// model rather than the control loop being studied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Warning {
    /// A plant lag is too short for the sample interval (`dt / T >= 1`).
    ///
    /// The explicit-Euler update coefficient `1 - dt/T` is zero or negative,
    /// so the process value oscillates or diverges regardless of the
    /// controller.
    NumericalInstability { lag: Time, ratio: f64 },

    /// The dead time is not a whole number of samples and was floored onto
    /// the sample grid.
    DelayQuantized { requested: Time, effective: Time },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericalInstability { lag, ratio } => write!(
                f,
                "dt / T = {ratio} for lag T = {} s; the discretized plant is unstable",
                lag.get::<second>()
            ),
            Self::DelayQuantized {
                requested,
                effective,
            } => write!(
                f,
                "dead time of {} s quantized to {} s",
                requested.get::<second>(),
                effective.get::<second>()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_lag() {
        let warning = Warning::NumericalInstability {
            lag: Time::new::<second>(0.5),
            ratio: 2.0,
        };
        assert_eq!(
            warning.to_string(),
            "dt / T = 2 for lag T = 0.5 s; the discretized plant is unstable"
        );
    }
}
