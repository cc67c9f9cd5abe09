//! # Premia
//!
//! Insurance premium prediction API.
//!
//! This crate provides:
//! - Feature derivation from raw applicant attributes (BMI, lifestyle risk,
//!   age group, city tier)
//! - An opaque premium-model port with an in-process artifact adapter
//! - An HTTP surface exposing home, health and predict endpoints
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (Applicant, FeatureRow, city tables)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (JSON model artifact, log sanitizing)
//! - `application`: Use cases orchestrating domain and ports
//! - `http`: axum router and handlers

pub mod adapters;
pub mod application;
pub mod domain;
pub mod http;
pub mod ports;

pub use domain::{Applicant, FeatureRow, Occupation};

/// Version label of the deployed model build, reported by the health check.
pub const MODEL_VERSION: &str = "v1.0.0";

/// Result type for Premia operations
pub type Result<T> = std::result::Result<T, PremiaError>;

/// Main error type for Premia
#[derive(Debug, thiserror::Error)]
pub enum PremiaError {
    #[error("Invalid applicant data: {0}")]
    Validation(#[from] domain::ValidationErrors),

    #[error("Model invocation failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
