//! Premium model port: Trait for the opaque pre-trained model.
//!
//! This trait abstracts the model-serving mechanism from the application
//! logic. The in-process artifact adapter is the default implementation;
//! a remote inference client could replace it without touching anything
//! else, as long as the per-request failure semantics are preserved.

use crate::domain::FeatureRow;

/// Errors raised by a model implementation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model artifact could not be loaded or failed its sanity checks.
    #[error("Model artifact invalid: {0}")]
    Artifact(String),

    /// A prediction call failed or produced unusable output.
    #[error("Prediction failed: {0}")]
    Invocation(String),
}

/// Trait for premium prediction.
///
/// Implementations must be safe for concurrent reads from many in-flight
/// requests; the trait offers no mutation after construction.
pub trait PremiumModel: Send + Sync {
    /// Predict the annual premium for one derived feature row.
    ///
    /// # Errors
    /// Returns `ModelError::Invocation` if the prediction fails or the
    /// output is not a finite number. A failure is fatal to its request
    /// only; implementations must not retry internally.
    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError>;
}
