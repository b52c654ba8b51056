//! Capability traits for simulator events.
//!
//! Observers written against these traits do not depend on a concrete event
//! type.
//!
//! # Example
//!
//! ```rust
//! use loopsim_core::Observer;
//! use loopsim_observers::traits::HasError;
//!
//! /// Integrated absolute error.
//! #[derive(Default)]
//! struct Iae {
//!     dt: f64,
//!     total: f64,
//! }
//!
//! impl<E: HasError> Observer<E> for Iae {
//!     fn observe(&mut self, event: &E) {
//!         self.total += event.error().abs() * self.dt;
//!     }
//! }
//! ```

use loopsim_solvers::transient::closed_loop;

/// An event tied to a sample number.
pub trait HasStep {
    /// Returns the sample number, `0` for the initial condition.
    fn step(&self) -> usize;
}

/// An event tied to a point in simulated time.
pub trait HasTime {
    /// Returns the sample time in seconds.
    fn time(&self) -> f64;
}

/// An event that carries the process value.
pub trait HasOutput {
    fn output(&self) -> f64;
}

/// An event that carries the actuator command.
pub trait HasControl {
    fn control(&self) -> f64;
}

/// An event that carries the control error.
pub trait HasError {
    fn error(&self) -> f64;
}

// --- closed_loop::Event ---

impl HasStep for closed_loop::Event {
    fn step(&self) -> usize {
        self.step
    }
}

impl HasTime for closed_loop::Event {
    fn time(&self) -> f64 {
        self.sample.time
    }
}

impl HasOutput for closed_loop::Event {
    fn output(&self) -> f64 {
        self.sample.output
    }
}

impl HasControl for closed_loop::Event {
    fn control(&self) -> f64 {
        self.sample.control
    }
}

impl HasError for closed_loop::Event {
    fn error(&self) -> f64 {
        self.sample.error
    }
}
