//! Premium quote record types.
//!
//! A quote is request-scoped: created after a successful model invocation,
//! logged for correlation, discarded once the response is sent. Only the
//! premium itself crosses the HTTP boundary.

use serde::{Deserialize, Serialize};

/// One completed prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumQuote {
    /// Unique identifier, used to correlate log lines
    pub id: String,

    /// Predicted annual premium
    pub premium: f64,

    /// Version label of the model build that produced this quote
    pub model_version: String,

    /// Timestamp of the prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PremiumQuote {
    /// Create a new quote for a model output.
    #[must_use]
    pub fn new(premium: f64, model_version: impl Into<String>) -> Self {
        Self {
            id: uuid_v4(),
            premium,
            model_version: model_version.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a simple UUID v4 (random) using CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so quote ids are unpredictable
/// on all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
