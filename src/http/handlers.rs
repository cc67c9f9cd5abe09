//! Request handlers for the three endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::application::{HealthStatus, PredictionService};
use crate::domain::Applicant;
use crate::http::ApiError;
use crate::ports::PremiumModel;

/// Static welcome text for `GET /`.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Insurance Premium Prediction API. Use the /predict endpoint to get predictions.";

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub predicted_premium: f64,
}

/// GET / — human-readable welcome.
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: WELCOME_MESSAGE,
    })
}

/// GET /health — machine-readable health check.
pub async fn health<M>(State(service): State<Arc<PredictionService<M>>>) -> Json<HealthStatus>
where
    M: PremiumModel,
{
    Json(service.health())
}

/// POST /predict — validate, derive features, invoke the model.
pub async fn predict<M>(
    State(service): State<Arc<PredictionService<M>>>,
    payload: Result<Json<Applicant>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError>
where
    M: PremiumModel + 'static,
{
    let Json(applicant) = payload?;

    // The model invocation is the only potentially blocking operation on
    // the request path; keep it off the async runtime.
    let quote = tokio::task::spawn_blocking(move || service.predict(&applicant))
        .await
        .map_err(|e| ApiError::Internal(format!("Prediction task failed: {e}")))??;

    Ok(Json(PredictResponse {
        predicted_premium: quote.premium,
    }))
}
