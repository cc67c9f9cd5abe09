//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external concerns:
//! - `artifact`: JSON model artifact loaded from disk
//! - `sanitize`: PII filtering for logs

pub mod artifact;
pub mod sanitize;

pub use artifact::{ArtifactModel, ExportedPremiumModel};
