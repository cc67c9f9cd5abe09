//! Applicant input types for premium prediction.
//!
//! Mirrors the JSON payload accepted by `POST /predict`. All range and
//! membership constraints are enforced by [`Applicant::validate`] before any
//! feature derivation runs; in particular `height > 0` is guaranteed here,
//! which makes the BMI division structurally safe downstream.

use serde::{Deserialize, Serialize};

use crate::domain::geo;

/// Closed set of occupations known to the premium model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    /// All occupations, in the order the training pipeline encodes them.
    pub const ALL: [Occupation; 7] = [
        Occupation::Retired,
        Occupation::Freelancer,
        Occupation::Student,
        Occupation::GovernmentJob,
        Occupation::BusinessOwner,
        Occupation::Unemployed,
        Occupation::PrivateJob,
    ];

    /// Wire-format name (matches the JSON payload and the artifact tables).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retired => "retired",
            Self::Freelancer => "freelancer",
            Self::Student => "student",
            Self::GovernmentJob => "government_job",
            Self::BusinessOwner => "business_owner",
            Self::Unemployed => "unemployed",
            Self::PrivateJob => "private_job",
        }
    }
}

impl std::fmt::Display for Occupation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed constraint, reported to the caller by field name.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Name of the offending input field
    pub field: &'static str,
    /// Why the value was rejected
    pub message: String,
}

/// Aggregate of all constraint violations found in one request.
#[derive(Debug, Clone)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::error::Error for ValidationErrors {}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Raw applicant attributes as received from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    /// Age in years, 0 < age < 120
    pub age: i64,

    /// Weight in kilograms, > 0
    pub weight: f64,

    /// Height in meters, > 0
    pub height: f64,

    /// Annual income in lakhs per annum, > 0
    pub income_lpa: f64,

    /// Smoking status: 0 for non-smoker, 1 for smoker
    pub smoker: u8,

    /// City of residence (free text, normalized before tier lookup)
    pub city: String,

    /// Occupation of the applicant
    pub occupation: Occupation,
}

impl Applicant {
    /// Validate all fields against their constraints.
    ///
    /// # Errors
    /// Returns every violated constraint, keyed by field name.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if !(1..120).contains(&self.age) {
            errors.push(FieldError {
                field: "age",
                message: format!("{} out of range (0, 120)", self.age),
            });
        }
        if !(self.weight > 0.0) || !self.weight.is_finite() {
            errors.push(FieldError {
                field: "weight",
                message: format!("{} must be a positive number of kilograms", self.weight),
            });
        }
        if !(self.height > 0.0) || !self.height.is_finite() {
            errors.push(FieldError {
                field: "height",
                message: format!("{} must be a positive number of meters", self.height),
            });
        }
        if !(self.income_lpa > 0.0) || !self.income_lpa.is_finite() {
            errors.push(FieldError {
                field: "income_lpa",
                message: format!("{} must be a positive number", self.income_lpa),
            });
        }
        if self.smoker > 1 {
            errors.push(FieldError {
                field: "smoker",
                message: format!("{} must be 0 or 1", self.smoker),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Whether the applicant is a smoker.
    #[must_use]
    pub fn smokes(&self) -> bool {
        self.smoker == 1
    }

    /// City name in canonical trimmed, title-cased form.
    #[must_use]
    pub fn normalized_city(&self) -> String {
        geo::normalize_city(&self.city)
    }
}
