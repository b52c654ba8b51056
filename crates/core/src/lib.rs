//! Core types for loopsim, a closed-loop process control simulator.
//!
//! This crate describes *what* is simulated; the stepping algorithm lives in
//! `loopsim-solvers`.
//!
//! - [`plant`] — process lag models ([`PlantModel`](plant::PlantModel)) and
//!   their discretized update rule
//! - [`controller`] — sampled controller laws
//!   ([`ControllerModel`](controller::ControllerModel)) and their memory
//! - [`SimulationConfig`] — a validated, immutable description of one run,
//!   built directly or from caller-supplied [`SimulationParams`]
//! - [`Trajectory`] — the time series a run produces
//! - [`Warning`] — advisory diagnostics attached to a run
//! - [`Observer`] — receives events while a run is in progress
//! - [`constraint`] — numeric constraints used during validation

pub mod constraint;
pub mod controller;
pub mod plant;

mod config;
mod diagnostic;
mod observer;
mod params;
mod trajectory;

pub use config::{ConfigError, MAX_SAMPLES, SimulationConfig};
pub use diagnostic::Warning;
pub use observer::Observer;
pub use params::SimulationParams;
pub use trajectory::{Sample, Trajectory};
