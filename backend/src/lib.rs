//! Ingres Groundwater Assistant - Backend
//!
//! Conversational access to Tamil Nadu groundwater statistics: the browser
//! client sends chat turns here, a hosted model answers, and sentinel
//! commands in its replies become charts and one-year forecasts.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use shared::Dataset;

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::LlmClient;
use services::ChatOrchestrator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dataset: Arc<Dataset>,
    pub chat: Arc<ChatOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, dataset: Dataset, llm: Arc<dyn LlmClient>) -> Self {
        let dataset = Arc::new(dataset);
        let chat = Arc::new(ChatOrchestrator::new(llm, Arc::clone(&dataset)));
        Self {
            config: Arc::new(config),
            dataset,
            chat,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Ingres Groundwater Assistant API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
