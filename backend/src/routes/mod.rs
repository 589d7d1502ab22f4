//! Route definitions for the Ingres groundwater assistant

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Language table for the selector
        .route("/languages", get(handlers::list_languages))
        // Read-only dataset
        .nest("/districts", district_routes())
        // Conversation
        .nest("/chat", chat_routes())
}

/// Dataset routes
fn district_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_districts))
        .route("/:district/records", get(handlers::get_district_records))
}

/// Conversation routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(handlers::send_message))
        .route("/transcript", get(handlers::get_transcript))
        .route("/status", get(handlers::get_status))
}
