//! Premia: Insurance premium prediction API
//!
//! Main entry point for the HTTP server.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use premia::adapters::sanitize::SanitizingMakeWriter;
use premia::adapters::ArtifactModel;
use premia::application::PredictionService;
use premia::http;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging.
    //
    // Default sink is stdout; set PREMIA_LOG_FILE to append to a file
    // instead (persisted via a data volume in container deployments).
    let (writer, _guard) = match std::env::var("PREMIA_LOG_FILE") {
        Ok(log_file) => {
            if let Some(parent) = Path::new(&log_file).parent() {
                // Best-effort: don't fail startup just because the directory is missing.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)?;
            tracing_appender::non_blocking(file)
        }
        Err(_) => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting premia (model build {})...", premia::MODEL_VERSION);

    // Load the model artifact once at startup. A failed load degrades to a
    // serving process that reports model_loaded=false; it must not abort.
    let model_path = std::env::var("PREMIA_MODEL_PATH")
        .unwrap_or_else(|_| "models/premium_model.json".to_string());
    let model = match ArtifactModel::load(Path::new(&model_path)) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => {
            tracing::error!(
                "Failed to load model artifact from {model_path}: {e}; \
                 serving with model_loaded=false"
            );
            None
        }
    };

    let service = Arc::new(PredictionService::new(model, premia::MODEL_VERSION));

    let addr = std::env::var("PREMIA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, http::router(service)).await?;

    tracing::info!("Premia shutdown complete.");
    Ok(())
}
