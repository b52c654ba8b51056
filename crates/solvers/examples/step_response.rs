//! Setpoint step response of the default furnace loop, printed as CSV.
//!
//! # Usage
//!
//! ```text
//! cargo run --example step_response
//! cargo run --example step_response -- incremental
//! cargo run --example step_response -- fuzzy 1.0 > fuzzy.csv
//! ```
//!
//! # Modes
//!
//! - **classic** — Positional PID with `Kp = 2`, `Ti = 10 s`, `Td = 0.5 s`.
//! - **incremental** — Velocity-form PID with matching parallel gains.
//! - **fuzzy** — Classic gains scheduled on the error magnitude.
//!
//! An optional second argument overrides the sample interval in seconds
//! (default `0.5`). Try `2.0` or larger against the 50 s lag to see the
//! discretization degrade; warnings go to stderr.

use std::error::Error;

use loopsim_core::{
    SimulationConfig, SimulationParams,
    controller::{ControllerModel, FuzzyPid, IncrementalPid},
};
use loopsim_solvers::transient::closed_loop;
use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::second,
};

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "classic".into());
    let dt = std::env::args()
        .nth(2)
        .as_deref()
        .map(str::parse::<f64>)
        .transpose()
        .unwrap_or_else(|_| {
            eprintln!("Invalid sample interval, expected a number of seconds, e.g. 0.5");
            std::process::exit(1);
        })
        .unwrap_or(0.5);

    let s = |value: f64| Time::new::<second>(value);
    let controller = match mode.as_str() {
        "classic" => SimulationParams::default().controller,
        "incremental" => {
            IncrementalPid::new(2.0, Frequency::new::<hertz>(0.2), s(1.0)).into()
        }
        "fuzzy" => ControllerModel::from(FuzzyPid {
            kp: 2.0,
            ti: s(10.0),
            td: s(0.5),
            error_span: 100.0,
            adaptation: 0.5,
        }),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: step_response [classic|incremental|fuzzy [dt]]");
            std::process::exit(1);
        }
    };

    let config = SimulationConfig::try_from(SimulationParams {
        controller,
        dt: s(dt),
        ..SimulationParams::default()
    })?;

    let trajectory = closed_loop::simulate(&config);
    for warning in &trajectory.warnings {
        eprintln!("warning: {warning}");
    }

    println!("time,output,control,error");
    for sample in trajectory.samples() {
        println!(
            "{},{},{},{}",
            sample.time, sample.output, sample.control, sample.error
        );
    }

    Ok(())
}
