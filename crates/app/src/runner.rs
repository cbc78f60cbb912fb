//! Headless runs driven from the command line.

use std::path::PathBuf;

use log::info;
use serde::Serialize;
use simcore::{CartPoleState, SimError, SimResult};

use crate::config::SimConfig;
use crate::disturbance::RandomDisturbance;
use crate::metrics::Metrics;
use crate::simulation::Simulation;

pub const USAGE: &str =
    "usage: cartpole [CONFIG.json] [--frames N] [--seed S] [--no-friction] [--verbose]";

/// Command-line options for a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub frames: usize,
    /// Seed for random shoves; no disturbance when absent
    pub seed: Option<u64>,
    pub friction: bool,
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            config_path: None,
            frames: 1200,
            seed: None,
            friction: true,
            verbose: false,
        }
    }
}

impl RunOptions {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = RunOptions::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => options.frames = parse_value(&arg, args.next())?,
                "--seed" => options.seed = Some(parse_value(&arg, args.next())?),
                "--no-friction" => options.friction = false,
                "--verbose" | "-v" => options.verbose = true,
                flag if flag.starts_with('-') => {
                    return Err(SimError::Config(format!("unknown flag {flag}\n{USAGE}")));
                }
                path => {
                    if options.config_path.is_some() {
                        return Err(SimError::Config(format!(
                            "unexpected argument {path}\n{USAGE}"
                        )));
                    }
                    options.config_path = Some(PathBuf::from(path));
                }
            }
        }
        Ok(options)
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> SimResult<T> {
    let value = value.ok_or_else(|| SimError::Config(format!("{flag} needs a value")))?;
    value
        .parse()
        .map_err(|_| SimError::Config(format!("invalid value for {flag}: {value}")))
}

/// Outcome of a headless run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub frames: usize,
    pub t: f64,
    pub final_state: CartPoleState,
    pub metrics: Metrics,
    pub saturated_frames: usize,
    pub contact_frames: usize,
}

/// Runs a simulation for `options.frames` frames.
pub fn run(config: &SimConfig, options: &RunOptions) -> SimResult<RunSummary> {
    let mut sim = Simulation::from_config(config);
    sim.set_friction(options.friction);

    let frame_dt = config.params.dt * config.params.substeps as f64;
    let mut disturbance = options.seed.map(RandomDisturbance::new);

    info!(
        "running {} frames ({:.2}s simulated), friction {}",
        options.frames,
        frame_dt * options.frames as f64,
        if options.friction { "on" } else { "off" }
    );

    let mut saturated_frames = 0;
    let mut contact_frames = 0;
    for _ in 0..options.frames {
        let external = disturbance.as_mut().map_or(0.0, |d| d.sample(frame_dt));
        if let Some(report) = sim.step_frame(external)? {
            saturated_frames += usize::from(report.saturated);
            contact_frames += usize::from(report.contact.is_constrained());
        }
    }

    let metrics = sim.metrics();
    match metrics.settle_time {
        Some(ts) => info!("settled at {ts:.2}s"),
        None => info!("did not settle"),
    }
    info!(
        "max |theta err| {:.3} rad, max |x err| {:.3} m, impulse {:.2} N*s",
        metrics.max_abs_theta, metrics.max_abs_x_dev, metrics.energy_abs_impulse
    );

    Ok(RunSummary {
        frames: options.frames,
        t: sim.t(),
        final_state: *sim.state(),
        metrics,
        saturated_frames,
        contact_frames,
    })
}
