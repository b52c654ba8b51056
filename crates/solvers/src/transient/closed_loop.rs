//! Closed-loop simulator for a sampled controller and a delayed plant.
//!
//! Each run starts from rest (zero output, zero command) and steps a fixed
//! horizon of `n = floor(total_time / dt)` samples:
//!
//! ```text
//! error[i]   = setpoint - output[i-1]
//! control[i] = controller(error[i])          clamped to [0, 100]
//! u[i]       = control[i - d]                0 while i < d
//! output[i]  = plant(output[i-1], u[i])
//! ```
//!
//! where `d = floor(dead_time / dt)`.
//!
//! # Example
//!
//! ```
//! use loopsim_core::{SimulationParams, SimulationConfig};
//! use loopsim_solvers::transient::closed_loop;
//!
//! let config = SimulationConfig::try_from(SimulationParams::default()).unwrap();
//! let trajectory = closed_loop::simulate(&config);
//!
//! assert_eq!(trajectory.len(), 600);
//! assert_eq!(trajectory.output[0], 0.0);
//! ```

mod delay;
mod event;

pub use delay::TransportDelay;
pub use event::Event;

use log::{debug, warn};
use loopsim_core::{
    Observer, Sample, SimulationConfig, Trajectory, controller::ControllerState, plant::PlantState,
};
use uom::si::time::second;

/// Runs the closed loop over the configured horizon.
///
/// This is a convenience wrapper around [`simulate_observed`] that discards
/// events.
#[must_use]
pub fn simulate(config: &SimulationConfig) -> Trajectory {
    simulate_observed(config, &mut ())
}

/// Runs the closed loop over the configured horizon, reporting every sample.
///
/// # Algorithm
///
/// 1. Record the zero initial condition as sample 0 and emit its event.
/// 2. For each sample `i` in `1..n`:
///    - Compute the error against the previous output.
///    - Ask the controller for a command (saturated to the actuator range).
///    - Pass the command through the transport delay.
///    - Advance the plant with the delayed command.
///    - Record the sample and emit an [`Event`].
/// 3. Return the trajectory with the configuration's warnings attached.
///
/// The run always covers the full horizon. An unstable configuration (see
/// [`Warning::NumericalInstability`](loopsim_core::Warning::NumericalInstability))
/// still completes; its output simply diverges.
pub fn simulate_observed<Obs>(config: &SimulationConfig, observer: &mut Obs) -> Trajectory
where
    Obs: Observer<Event> + ?Sized,
{
    let steps = config.step_count();
    let dt = config.dt();
    let dt_s = dt.get::<second>();
    let setpoint = config.setpoint();
    let controller = config.controller();
    let plant = config.plant().model.discretize(dt);
    let delay = TransportDelay::new(config.delay_steps());

    let warnings = config.warnings();
    debug!(
        "closed loop: {steps} samples of {dt_s} s, dead time of {} samples, setpoint {setpoint}",
        delay.steps()
    );
    for warning in &warnings {
        warn!("{warning}");
    }

    let mut trajectory = Trajectory::with_capacity(steps, warnings);
    let mut controller_state = ControllerState::default();
    let mut plant_state = PlantState::default();

    let initial = Sample::default();
    trajectory.push(initial);
    observer.observe(&Event {
        step: 0,
        sample: initial,
        delayed_control: 0.0,
    });

    for step in 1..steps {
        let error = setpoint - plant_state.output();
        let control = controller.command(&mut controller_state, error, dt);

        let delayed_control = delay.delayed(&trajectory.control, control);
        plant_state = plant.advance(plant_state, delayed_control);

        #[allow(clippy::cast_precision_loss)]
        let sample = Sample {
            time: step as f64 * dt_s,
            output: plant_state.output(),
            control,
            error,
        };
        trajectory.push(sample);

        observer.observe(&Event {
            step,
            sample,
            delayed_control,
        });
    }

    trajectory
}
