//! Artifact adapter: in-process premium model loaded from a JSON export.
//!
//! The offline training pipeline exports the fitted regression as a JSON
//! artifact: an intercept, coefficients for the two numeric features and
//! weight tables for the four categorical ones. The artifact stays opaque to
//! the rest of the crate behind the `PremiumModel` port; swapping in a
//! remote inference client only requires another implementation.
//!
//! # Integrity
//!
//! When a `<artifact>.sha256` sidecar exists, its hex digest must match the
//! artifact bytes or the load fails. Setting
//! `PREMIA_REQUIRE_MODEL_CHECKSUM=true` makes a missing sidecar a load
//! error as well.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{AgeGroup, FeatureRow, LifestyleRisk, Occupation};
use crate::ports::{ModelError, PremiumModel};

/// Environment variable that makes the checksum sidecar mandatory.
const REQUIRE_CHECKSUM_ENV: &str = "PREMIA_REQUIRE_MODEL_CHECKSUM";

/// City tiers the training pipeline encodes.
const CITY_TIER_KEYS: [&str; 3] = ["1", "2", "3"];

/// Model parameters exported by the training pipeline.
///
/// This matches the JSON structure produced by the offline export step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedPremiumModel {
    pub intercept: f64,
    pub bmi_coef: f64,
    pub income_lpa_coef: f64,
    pub age_group_weights: BTreeMap<String, f64>,
    pub lifestyle_risk_weights: BTreeMap<String, f64>,
    pub city_tier_weights: BTreeMap<String, f64>,
    pub occupation_weights: BTreeMap<String, f64>,
}

fn parse_bool_env(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut os = artifact.as_os_str().to_owned();
    os.push(".sha256");
    PathBuf::from(os)
}

/// In-process premium model backed by a JSON artifact.
#[derive(Debug)]
pub struct ArtifactModel {
    model: ExportedPremiumModel,
}

impl ArtifactModel {
    /// Load and sanity-check the artifact at `path`.
    ///
    /// # Errors
    /// Returns `ModelError::Artifact` if the file is missing, malformed,
    /// fails its checksum or fails the structural sanity checks.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Self::load_with_options(path, parse_bool_env(REQUIRE_CHECKSUM_ENV))
    }

    fn load_with_options(path: &Path, require_checksum: bool) -> Result<Self, ModelError> {
        let bytes = fs::read(path)
            .map_err(|e| ModelError::Artifact(format!("Failed to read {path:?}: {e}")))?;

        Self::verify_checksum(path, &bytes, require_checksum)?;

        let model: ExportedPremiumModel = serde_json::from_slice(&bytes)
            .map_err(|e| ModelError::Artifact(format!("Invalid artifact format: {e}")))?;
        Self::sanity_check(&model)?;

        tracing::info!(
            "Loaded premium model from {:?} ({} occupation weights, {} city tiers)",
            path,
            model.occupation_weights.len(),
            model.city_tier_weights.len()
        );

        Ok(Self { model })
    }

    /// Verify the SHA-256 sidecar, when present or required.
    fn verify_checksum(
        path: &Path,
        bytes: &[u8],
        require_checksum: bool,
    ) -> Result<(), ModelError> {
        let sidecar = sidecar_path(path);
        let expected = match fs::read_to_string(&sidecar) {
            Ok(content) => content,
            Err(_) if !require_checksum => {
                tracing::debug!("No checksum sidecar at {:?}, skipping verification", sidecar);
                return Ok(());
            }
            Err(e) => {
                return Err(ModelError::Artifact(format!(
                    "Checksum sidecar required ({REQUIRE_CHECKSUM_ENV}) but unreadable: {e}"
                )));
            }
        };

        // sha256sum format: "<hex digest>  <filename>"; take the first token.
        let expected = expected.split_whitespace().next().unwrap_or("");
        let actual = sha256_hex(bytes);
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ModelError::Artifact(format!(
                "Artifact hash mismatch for {path:?}: expected {expected}, got {actual}"
            )));
        }

        tracing::info!("Artifact checksum verified for {:?}", path);
        Ok(())
    }

    /// Structural sanity checks: every category the deriver can emit must
    /// carry a finite weight, and all coefficients must be finite.
    fn sanity_check(model: &ExportedPremiumModel) -> Result<(), ModelError> {
        if !model.intercept.is_finite() {
            return Err(ModelError::Artifact("Non-finite intercept".into()));
        }
        if !model.bmi_coef.is_finite() || !model.income_lpa_coef.is_finite() {
            return Err(ModelError::Artifact("Non-finite numeric coefficient".into()));
        }

        let tables: [(&str, &BTreeMap<String, f64>, Vec<&str>); 4] = [
            (
                "age_group",
                &model.age_group_weights,
                AgeGroup::ALL.iter().map(AgeGroup::as_str).collect(),
            ),
            (
                "lifestyle_risk",
                &model.lifestyle_risk_weights,
                LifestyleRisk::ALL.iter().map(LifestyleRisk::as_str).collect(),
            ),
            ("city_tier", &model.city_tier_weights, CITY_TIER_KEYS.to_vec()),
            (
                "occupation",
                &model.occupation_weights,
                Occupation::ALL.iter().map(Occupation::as_str).collect(),
            ),
        ];

        for (name, table, required) in tables {
            for key in required {
                match table.get(key) {
                    Some(w) if w.is_finite() => {}
                    Some(_) => {
                        return Err(ModelError::Artifact(format!(
                            "Non-finite {name} weight for '{key}'"
                        )));
                    }
                    None => {
                        return Err(ModelError::Artifact(format!(
                            "Missing {name} weight for '{key}'"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn category_weight(
        table: &BTreeMap<String, f64>,
        name: &str,
        key: &str,
    ) -> Result<f64, ModelError> {
        table
            .get(key)
            .copied()
            .ok_or_else(|| ModelError::Invocation(format!("No {name} weight for '{key}'")))
    }
}

impl PremiumModel for ArtifactModel {
    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let m = &self.model;

        let premium = m.intercept
            + m.bmi_coef * row.bmi
            + m.income_lpa_coef * row.income_lpa
            + Self::category_weight(&m.age_group_weights, "age_group", row.age_group.as_str())?
            + Self::category_weight(
                &m.lifestyle_risk_weights,
                "lifestyle_risk",
                row.lifestyle_risk.as_str(),
            )?
            + Self::category_weight(
                &m.city_tier_weights,
                "city_tier",
                &row.city_tier.to_string(),
            )?
            + Self::category_weight(&m.occupation_weights, "occupation", row.occupation.as_str())?;

        if !premium.is_finite() {
            return Err(ModelError::Invocation(
                "Prediction produced a non-finite premium".into(),
            ));
        }

        Ok(premium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_model() -> ExportedPremiumModel {
        let pairs = |kv: &[(&str, f64)]| {
            kv.iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<String, f64>>()
        };
        ExportedPremiumModel {
            intercept: 5000.0,
            bmi_coef: 100.0,
            income_lpa_coef: 50.0,
            age_group_weights: pairs(&[
                ("young", -500.0),
                ("adult", 0.0),
                ("middle_aged", 800.0),
                ("senior", 2000.0),
            ]),
            lifestyle_risk_weights: pairs(&[("low", 0.0), ("medium", 700.0), ("high", 1500.0)]),
            city_tier_weights: pairs(&[("1", 900.0), ("2", 300.0), ("3", 0.0)]),
            occupation_weights: pairs(&[
                ("retired", 400.0),
                ("freelancer", 200.0),
                ("student", -300.0),
                ("government_job", -100.0),
                ("business_owner", 250.0),
                ("unemployed", 350.0),
                ("private_job", 0.0),
            ]),
        }
    }

    fn write_artifact(dir: &Path, model: &ExportedPremiumModel) -> PathBuf {
        let path = dir.join("premium_model.json");
        let json = serde_json::to_string_pretty(model).expect("serialize model");
        fs::write(&path, json).expect("write model");
        path
    }

    fn reference_row() -> FeatureRow {
        FeatureRow {
            bmi: 23.02,
            age_group: AgeGroup::Adult,
            lifestyle_risk: LifestyleRisk::Low,
            city_tier: 1,
            income_lpa: 10.0,
            occupation: Occupation::PrivateJob,
        }
    }

    #[test]
    fn test_load_and_predict() {
        let temp = tempdir().expect("tempdir");
        let path = write_artifact(temp.path(), &test_model());

        let model = ArtifactModel::load(&path).expect("load artifact");
        let premium = model.predict(&reference_row()).expect("predict");

        // 5000 + 100*23.02 + 50*10 + 0 + 0 + 900 + 0
        assert!((premium - 8702.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_rejects_missing_category_weight() {
        let temp = tempdir().expect("tempdir");
        let mut model = test_model();
        model.occupation_weights.remove("student");
        let path = write_artifact(temp.path(), &model);

        let err = ArtifactModel::load(&path).expect_err("must fail");
        let msg = err.to_string();
        assert!(msg.contains("occupation"));
        assert!(msg.contains("student"));
    }

    #[test]
    fn test_load_rejects_non_finite_values() {
        let temp = tempdir().expect("tempdir");
        // serde_json parses out-of-range literals as infinity.
        let json = serde_json::to_string(&test_model())
            .expect("serialize model")
            .replace("5000.0", "1e999");
        let path = temp.path().join("premium_model.json");
        fs::write(&path, json).expect("write model");

        let err = ArtifactModel::load(&path).expect_err("must fail");
        assert!(err.to_string().contains("Non-finite"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("premium_model.json");
        fs::write(&path, "{not json").expect("write file");

        let err = ArtifactModel::load(&path).expect_err("must fail");
        assert!(err.to_string().contains("Invalid artifact format"));
    }

    #[test]
    fn test_load_verifies_matching_checksum() {
        let temp = tempdir().expect("tempdir");
        let path = write_artifact(temp.path(), &test_model());
        let bytes = fs::read(&path).expect("read artifact");
        fs::write(
            sidecar_path(&path),
            format!("{}  premium_model.json\n", sha256_hex(&bytes)),
        )
        .expect("write sidecar");

        assert!(ArtifactModel::load_with_options(&path, true).is_ok());
    }

    #[test]
    fn test_load_rejects_checksum_mismatch() {
        let temp = tempdir().expect("tempdir");
        let path = write_artifact(temp.path(), &test_model());
        fs::write(sidecar_path(&path), format!("{}\n", sha256_hex(b"tampered")))
            .expect("write sidecar");

        let err = ArtifactModel::load_with_options(&path, false).expect_err("must fail");
        assert!(err.to_string().contains("hash mismatch"));
    }

    #[test]
    fn test_required_checksum_fails_without_sidecar() {
        let temp = tempdir().expect("tempdir");
        let path = write_artifact(temp.path(), &test_model());

        let err = ArtifactModel::load_with_options(&path, true).expect_err("must fail");
        assert!(err.to_string().contains("Checksum sidecar required"));
    }

    #[test]
    fn test_predict_covers_every_category_combination() {
        let temp = tempdir().expect("tempdir");
        let path = write_artifact(temp.path(), &test_model());
        let model = ArtifactModel::load(&path).expect("load artifact");

        for age_group in AgeGroup::ALL {
            for lifestyle_risk in LifestyleRisk::ALL {
                for city_tier in [1u8, 2, 3] {
                    for occupation in Occupation::ALL {
                        let row = FeatureRow {
                            bmi: 24.5,
                            age_group,
                            lifestyle_risk,
                            city_tier,
                            income_lpa: 8.0,
                            occupation,
                        };
                        let premium = model.predict(&row).expect("predict");
                        assert!(premium.is_finite());
                    }
                }
            }
        }
    }
}
