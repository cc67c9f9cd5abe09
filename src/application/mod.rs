//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement the
//! request lifecycle: validate, derive, invoke, wrap.

mod prediction;

pub use prediction::{HealthStatus, PredictionService};
