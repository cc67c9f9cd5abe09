//! Derived feature row consumed by the premium model.
//!
//! Every feature is fully determined by a validated [`Applicant`]; derivation
//! is pure and deterministic. Classification thresholds match the training
//! pipeline: lifestyle risk uses strict `>` comparisons on the already
//! rounded BMI, so the boundary values 27.00 and 30.00 stay in the lower
//! tier.

use serde::{Deserialize, Serialize};

use crate::domain::{geo, Applicant, Occupation};

/// Lifestyle risk classification derived from smoking status and BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleRisk {
    Low,
    Medium,
    High,
}

impl LifestyleRisk {
    /// All risk tiers, in ascending order.
    pub const ALL: [LifestyleRisk; 3] = [
        LifestyleRisk::Low,
        LifestyleRisk::Medium,
        LifestyleRisk::High,
    ];

    /// Classify from smoking status and 2-decimal-rounded BMI.
    #[must_use]
    pub fn classify(smoker: bool, bmi: f64) -> Self {
        if smoker && bmi > 30.0 {
            Self::High
        } else if smoker && bmi > 27.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Wire-format name (matches the artifact weight tables).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for LifestyleRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age bucket derived from the applicant's age in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Young,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    /// All age buckets, in ascending order.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Young,
        AgeGroup::Adult,
        AgeGroup::MiddleAged,
        AgeGroup::Senior,
    ];

    /// Bucket boundaries: <25 young, <45 adult, <60 middle_aged, else senior.
    #[must_use]
    pub fn classify(age: i64) -> Self {
        if age < 25 {
            Self::Young
        } else if age < 45 {
            Self::Adult
        } else if age < 60 {
            Self::MiddleAged
        } else {
            Self::Senior
        }
    }

    /// Wire-format name (matches the artifact weight tables).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Young => "young",
            Self::Adult => "adult",
            Self::MiddleAged => "middle_aged",
            Self::Senior => "senior",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body Mass Index: weight / height², rounded to 2 decimal places.
///
/// Rounding rule: half away from zero (`f64::round` semantics); the exact
/// tie-break is pinned by the tests below. Callers must guarantee
/// `height > 0` (enforced by input validation).
#[must_use]
pub fn compute_bmi(weight: f64, height: f64) -> f64 {
    (weight / (height * height) * 100.0).round() / 100.0
}

/// The fixed 6-field row the premium model consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: u8,
    pub income_lpa: f64,
    pub occupation: Occupation,
}

impl FeatureRow {
    /// Derive the full feature row from a validated applicant.
    #[must_use]
    pub fn derive(applicant: &Applicant) -> Self {
        let bmi = compute_bmi(applicant.weight, applicant.height);
        let city = geo::normalize_city(&applicant.city);
        Self {
            bmi,
            age_group: AgeGroup::classify(applicant.age),
            lifestyle_risk: LifestyleRisk::classify(applicant.smokes(), bmi),
            city_tier: geo::city_tier(&city),
            income_lpa: applicant.income_lpa,
            occupation: applicant.occupation,
        }
    }
}
