//! Relative value (RV) calculation and reporting-senior profile replay for
//! fitness reports, with the configuration, telemetry, and HTTP plumbing the
//! API service builds on.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
