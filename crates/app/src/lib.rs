//! Cart-pole simulation orchestration
//!
//! This crate provides:
//! - The fixed-step simulation loop tying plant, controller and contact together
//! - Running performance metrics with settling detection
//! - A bounded history trace
//! - JSON configuration and a headless runner

pub mod config;
pub mod disturbance;
pub mod history;
pub mod metrics;
pub mod runner;
pub mod simulation;

pub use config::SimConfig;
pub use disturbance::RandomDisturbance;
pub use history::{History, HistorySample};
pub use metrics::{Metrics, MetricsTracker};
pub use runner::{run, RunOptions, RunSummary};
pub use simulation::{Simulation, StepReport};
