use crate::diagnostic::Warning;

/// One sample of a closed-loop run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sample {
    /// Sample time in seconds, `i * dt`.
    pub time: f64,

    /// Process value (PV).
    pub output: f64,

    /// Actuator command (OP), always within the actuator range.
    pub control: f64,

    /// `setpoint - output[i-1]`, the error the controller acted on.
    pub error: f64,
}

/// The result of a closed-loop run.
///
/// Four equal-length series indexed by sample number, plus any advisory
/// [`Warning`]s raised for the configuration that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub output: Vec<f64>,
    pub control: Vec<f64>,
    pub error: Vec<f64>,
    pub warnings: Vec<Warning>,
}

impl Trajectory {
    /// Creates an empty trajectory with room for `len` samples.
    #[must_use]
    pub fn with_capacity(len: usize, warnings: Vec<Warning>) -> Self {
        Self {
            time: Vec::with_capacity(len),
            output: Vec::with_capacity(len),
            control: Vec::with_capacity(len),
            error: Vec::with_capacity(len),
            warnings,
        }
    }

    /// Appends a sample to all four series.
    pub fn push(&mut self, sample: Sample) {
        self.time.push(sample.time);
        self.output.push(sample.output);
        self.control.push(sample.control);
        self.error.push(sample.error);
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the trajectory holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the sample at index `i`, if any.
    #[must_use]
    pub fn sample(&self, i: usize) -> Option<Sample> {
        Some(Sample {
            time: *self.time.get(i)?,
            output: *self.output.get(i)?,
            control: *self.control.get(i)?,
            error: *self.error.get(i)?,
        })
    }

    /// Returns the final sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.sample(i))
    }

    /// Iterates over the samples in time order.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|i| self.sample(i))
    }
}
