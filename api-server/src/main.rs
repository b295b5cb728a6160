//! PhishGuard ML API Server
//!
//! HTTP boundary for the URL phishing classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PHISHGUARD ML API                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  startup (once)                  request path (many)        │
//! │  ┌──────────────┐                ┌───────────────────────┐  │
//! │  │ Corpus       │                │ POST /predict         │  │
//! │  │  → train()   │──TrainedModel─▶│ POST /extract_features│  │
//! │  │  (blocking)  │   (Arc, r/o)   │ GET  /model/status    │  │
//! │  └──────────────┘                │ GET  /health          │  │
//! │                                  └───────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;


use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use phishguard_core::{train, InferenceService, TrainingCorpus};
use tower_http::{
    compression::CompressionLayer,
    cors::{CorsLayer, Any},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging first so configuration warnings are visible
    init_tracing(LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()));

    // Load configuration
    let config = Config::from_env();

    tracing::info!(
        "PhishGuard ML API starting ({}, {:?} logs)...",
        config.environment,
        config.log_format
    );
    if config.is_production() && config.corpus_path.is_none() {
        tracing::warn!("Production mode without CORPUS_PATH - serving the seed corpus model");
    }

    // Train once, before accepting traffic
    let service = tokio::task::spawn_blocking({
        let config = config.clone();
        move || build_service(&config)
    })
    .await?;

    let state = AppState {
        service,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phishguard_server=debug,phishguard_core=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: InferenceService,
    pub config: Config,
}

/// Load the configured corpus, falling back to the built-in seed set
fn load_corpus(config: &Config) -> TrainingCorpus {
    match &config.corpus_path {
        Some(path) => match TrainingCorpus::load_jsonl(path) {
            Ok(corpus) => corpus,
            Err(e) => {
                tracing::warn!(
                    "Failed to load corpus from {}: {} - using built-in seed corpus",
                    path.display(),
                    e
                );
                TrainingCorpus::seed()
            }
        },
        None => {
            tracing::info!("No CORPUS_PATH set - using built-in seed corpus");
            TrainingCorpus::seed()
        }
    }
}

/// Run the training pipeline and wrap the result for serving
fn build_service(config: &Config) -> InferenceService {
    let corpus = load_corpus(config);

    match train(&corpus, &config.training) {
        Ok(model) => {
            if model.is_features_only() {
                tracing::warn!("Serving in features-only mode");
            } else {
                tracing::info!("ML model trained on {} examples", model.report().corpus_size);
            }
            InferenceService::new(Arc::new(model))
        }
        Err(e) => {
            tracing::warn!("Training unavailable: {} - predictions will report 'Model not trained'", e);
            InferenceService::untrained()
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/extract_features", post(handlers::features::extract))
        .route("/model/status", get(handlers::model::status))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
