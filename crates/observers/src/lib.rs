//! Reusable observers and metrics for loopsim.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits over simulator events
//!   ([`HasStep`], [`HasTime`], [`HasOutput`], [`HasControl`], [`HasError`])
//! - [`metrics`] — Step-response figures computed from a finished
//!   [`Trajectory`](loopsim_core::Trajectory)
//!
//! # Observers
//!
//! - [`SaturationCounter`] — counts commands pinned at an actuator limit
//! - [`PeakTracker`] — running maximum of the process value
//!
//! [`HasStep`]: traits::HasStep
//! [`HasTime`]: traits::HasTime
//! [`HasOutput`]: traits::HasOutput
//! [`HasControl`]: traits::HasControl
//! [`HasError`]: traits::HasError

pub mod metrics;
pub mod traits;

mod peak;
mod saturation;

pub use peak::PeakTracker;
pub use saturation::SaturationCounter;
