//! Runtime glue that wires configuration, run context, output preparation,
//! telemetry, and runner orchestration.

pub mod config;
pub mod context;
pub mod output;
pub mod runner;
pub mod telemetry;
