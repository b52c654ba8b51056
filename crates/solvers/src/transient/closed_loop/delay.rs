/// A pure transport delay of a whole number of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportDelay {
    steps: usize,
}

impl TransportDelay {
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Returns the delay in samples.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the command that reaches the plant at sample `i`.
    ///
    /// `history` holds the commands of samples `0..i` and `current` is the
    /// command just issued at sample `i`. The result is `control[i - steps]`,
    /// or zero while `i < steps` (nothing has arrived yet).
    #[must_use]
    pub fn delayed(&self, history: &[f64], current: f64) -> f64 {
        if self.steps == 0 {
            return current;
        }
        history
            .len()
            .checked_sub(self.steps)
            .and_then(|index| history.get(index))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_passes_current_command() {
        let delay = TransportDelay::new(0);
        assert_eq!(delay.delayed(&[0.0, 1.0, 2.0], 3.0), 3.0);
        assert_eq!(delay.delayed(&[], 7.0), 7.0);
    }

    #[test]
    fn nothing_arrives_before_the_delay() {
        let delay = TransportDelay::new(3);
        assert_eq!(delay.delayed(&[], 9.0), 0.0);
        assert_eq!(delay.delayed(&[0.0, 5.0], 9.0), 0.0);
    }

    #[test]
    fn picks_command_from_steps_ago() {
        let delay = TransportDelay::new(2);
        let history = [0.0, 10.0, 20.0, 30.0];

        // Sample 4 receives the command from sample 2.
        assert_eq!(delay.delayed(&history, 40.0), 20.0);

        // Sample 2 receives the initial (zero) command.
        assert_eq!(delay.delayed(&history[..2], 20.0), 0.0);
        assert_eq!(delay.steps(), 2);
    }
}
