use loopsim_core::{
    Observer,
    controller::{ACTUATOR_MAX, ACTUATOR_MIN},
};

use crate::traits::{HasControl, HasStep};

/// Counts commands that sit on an actuator limit.
///
/// The initial condition (step 0) is not a controller command and is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaturationCounter {
    commands: usize,
    at_min: usize,
    at_max: usize,
}

impl SaturationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many commands were observed.
    #[must_use]
    pub fn commands(&self) -> usize {
        self.commands
    }

    /// Returns how many commands sat on the lower limit.
    #[must_use]
    pub fn at_min(&self) -> usize {
        self.at_min
    }

    /// Returns how many commands sat on the upper limit.
    #[must_use]
    pub fn at_max(&self) -> usize {
        self.at_max
    }

    /// Returns the fraction of commands on either limit, or zero before any
    /// command has been observed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.commands == 0 {
            return 0.0;
        }
        (self.at_min + self.at_max) as f64 / self.commands as f64
    }
}

impl<E: HasStep + HasControl> Observer<E> for SaturationCounter {
    fn observe(&mut self, event: &E) {
        if event.step() == 0 {
            return;
        }

        self.commands += 1;
        let control = event.control();
        if control <= ACTUATOR_MIN {
            self.at_min += 1;
        } else if control >= ACTUATOR_MAX {
            self.at_max += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Command(usize, f64);

    impl HasStep for Command {
        fn step(&self) -> usize {
            self.0
        }
    }

    impl HasControl for Command {
        fn control(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn counts_both_limits() {
        let mut counter = SaturationCounter::new();
        for (step, control) in [0.0, 100.0, 100.0, 42.0, 0.0].into_iter().enumerate() {
            counter.observe(&Command(step, control));
        }

        assert_eq!(counter.commands(), 4);
        assert_eq!(counter.at_max(), 2);
        assert_eq!(counter.at_min(), 1);
        assert!((counter.fraction() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn empty_counter_reports_zero() {
        let counter = SaturationCounter::new();
        assert_eq!(counter.fraction(), 0.0);
    }
}
