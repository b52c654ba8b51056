//! Simulators for loopsim.
//!
//! - [`transient::closed_loop`] — steps a controller and a delayed plant
//!   through a fixed horizon

pub mod transient;
