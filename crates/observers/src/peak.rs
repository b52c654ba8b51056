use loopsim_core::Observer;
use uom::si::{f64::Time, time::second};

use crate::traits::{HasOutput, HasTime};

/// Tracks the largest process value seen so far and when it first occurred.
///
/// NaN outputs are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakTracker {
    peak: Option<(f64, f64)>,
}

impl PeakTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the peak process value, if any event has been observed.
    #[must_use]
    pub fn peak(&self) -> Option<f64> {
        self.peak.map(|(_, output)| output)
    }

    /// Returns when the peak first occurred.
    #[must_use]
    pub fn peak_time(&self) -> Option<Time> {
        self.peak.map(|(time, _)| Time::new::<second>(time))
    }
}

impl<E: HasTime + HasOutput> Observer<E> for PeakTracker {
    fn observe(&mut self, event: &E) {
        let output = event.output();
        if output.is_nan() {
            return;
        }
        match self.peak {
            Some((_, peak)) if output <= peak => {}
            _ => self.peak = Some((event.time(), output)),
        }
    }
}
