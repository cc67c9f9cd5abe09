//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the opaque model-serving mechanism.

mod model;

pub use model::{ModelError, PremiumModel};
