//! HTTP surface: axum router and handlers.
//!
//! The host runtime determines concurrency; every request is independent
//! and the shared state (the loaded model behind the prediction service)
//! is read-only.

mod error;
pub mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::application::PredictionService;
use crate::ports::PremiumModel;

/// Build the application router over any model implementation.
pub fn router<M>(service: Arc<PredictionService<M>>) -> Router
where
    M: PremiumModel + 'static,
{
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health::<M>))
        .route("/predict", post(handlers::predict::<M>))
        .with_state(service)
}
