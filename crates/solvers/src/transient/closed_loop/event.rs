use loopsim_core::Sample;

/// Event emitted by the closed-loop simulator for each sample.
///
/// Step 0 is the zero initial condition.
/// Steps 1..n are emitted after the plant has been advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The sample number (0 for the initial condition).
    pub step: usize,

    /// The values recorded in the trajectory at this step.
    pub sample: Sample,

    /// The command that actually reached the plant at this step, after the
    /// transport delay.
    pub delayed_control: f64,
}
