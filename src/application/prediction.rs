//! Prediction service: Orchestrates the request lifecycle.
//!
//! This service coordinates:
//! - Input validation
//! - Feature derivation
//! - Model invocation
//! - Quote wrapping
//!
//! Each call is stateless and independent; the only shared state is the
//! immutable loaded model behind an `Arc`.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Applicant, FeatureRow, PremiumQuote};
use crate::ports::PremiumModel;
use crate::PremiaError;

/// Snapshot reported by the health check.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub model_loaded: bool,
}

/// Service for premium prediction.
///
/// Holds `Option<Arc<M>>` so that a failed model load at startup degrades
/// to a serving process that reports `model_loaded: false` and fails each
/// predict call gracefully, instead of refusing to boot.
pub struct PredictionService<M>
where
    M: PremiumModel,
{
    model: Option<Arc<M>>,
    version: &'static str,
}

impl<M> PredictionService<M>
where
    M: PremiumModel,
{
    /// Create a new prediction service.
    pub fn new(model: Option<Arc<M>>, version: &'static str) -> Self {
        Self { model, version }
    }

    /// Whether the model artifact was successfully loaded at startup.
    #[must_use]
    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Health snapshot for `GET /health`.
    #[must_use]
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "OK",
            version: self.version,
            model_loaded: self.is_model_loaded(),
        }
    }

    /// Run one prediction.
    ///
    /// Validation failures never reach the model; model failures are fatal
    /// to this request only and are never retried.
    ///
    /// # Errors
    /// Returns `PremiaError::Validation` for constraint violations,
    /// `PremiaError::ModelNotLoaded` when startup loading failed, and
    /// `PremiaError::Model` when the invocation itself fails.
    pub fn predict(&self, applicant: &Applicant) -> Result<PremiumQuote, PremiaError> {
        applicant.validate()?;

        let row = FeatureRow::derive(applicant);
        tracing::debug!(
            "Derived features: bmi={}, age_group={}, lifestyle_risk={}, city_tier={}, income_lpa={}, occupation={}",
            row.bmi,
            row.age_group,
            row.lifestyle_risk,
            row.city_tier,
            row.income_lpa,
            row.occupation
        );

        let model = self
            .model
            .as_ref()
            .ok_or_else(|| PremiaError::ModelNotLoaded("premium model unavailable".to_string()))?;

        let premium = model.predict(&row)?;
        let quote = PremiumQuote::new(premium, self.version);

        tracing::info!(
            "Prediction complete: quote={}, premium={:.2}, model={}",
            quote.id,
            quote.premium,
            quote.model_version
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Occupation;
    use crate::ports::ModelError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubModel {
        premium: f64,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn new(premium: f64) -> Self {
            Self {
                premium,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PremiumModel for StubModel {
        fn predict(&self, _row: &FeatureRow) -> Result<f64, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.premium)
        }
    }

    struct FailingModel;

    impl PremiumModel for FailingModel {
        fn predict(&self, _row: &FeatureRow) -> Result<f64, ModelError> {
            Err(ModelError::Invocation("backend unavailable".into()))
        }
    }

    fn applicant() -> Applicant {
        Applicant {
            age: 30,
            weight: 70.5,
            height: 1.75,
            income_lpa: 10.0,
            smoker: 1,
            city: "mumbai".to_string(),
            occupation: Occupation::PrivateJob,
        }
    }

    #[test]
    fn test_predict_returns_quote() {
        let model = Arc::new(StubModel::new(12345.5));
        let service = PredictionService::new(Some(model.clone()), "v1.0.0");

        let quote = service.predict(&applicant()).expect("should predict");
        assert_eq!(quote.premium, 12345.5);
        assert_eq!(quote.model_version, "v1.0.0");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_input_never_reaches_model() {
        let model = Arc::new(StubModel::new(1.0));
        let service = PredictionService::new(Some(model.clone()), "v1.0.0");

        let mut bad = applicant();
        bad.age = 150;
        let err = service.predict(&bad).expect_err("must reject");
        assert!(matches!(err, PremiaError::Validation(_)));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_failure_is_surfaced() {
        let service = PredictionService::new(Some(Arc::new(FailingModel)), "v1.0.0");

        let err = service.predict(&applicant()).expect_err("must fail");
        assert!(matches!(err, PremiaError::Model(_)));
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn test_missing_model_degrades_gracefully() {
        let service: PredictionService<StubModel> = PredictionService::new(None, "v1.0.0");

        assert!(!service.is_model_loaded());
        let health = service.health();
        assert_eq!(health.status, "OK");
        assert!(!health.model_loaded);

        let err = service.predict(&applicant()).expect_err("must fail");
        assert!(matches!(err, PremiaError::ModelNotLoaded(_)));
    }

    #[test]
    fn test_health_reports_loaded_model() {
        let service = PredictionService::new(Some(Arc::new(StubModel::new(1.0))), "v1.0.0");
        let health = service.health();
        assert_eq!(health.status, "OK");
        assert_eq!(health.version, "v1.0.0");
        assert!(health.model_loaded);
    }
}
