//! HTTP handlers for the conversation endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{ConversationEntry, LanguageOption};

use crate::error::{AppError, AppResult};
use crate::services::TurnState;
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// A message typed or dictated by the user
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
    /// Locale code of the selected language, e.g. `ta-IN`
    #[serde(default)]
    pub language: Option<String>,
}

/// Entries appended by one turn
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub entries: Vec<ConversationEntry>,
}

/// Busy indicator for the chat box
#[derive(Debug, Serialize)]
pub struct TurnStatusResponse {
    pub state: TurnState,
    pub busy: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Run one conversation turn
/// POST /chat/messages
///
/// The turn runs on its own task so it completes even if the client
/// disconnects mid-request.
pub async fn send_message(
    State(state): State<AppState>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<Json<SendMessageResponse>> {
    let language = LanguageOption::from_code(input.language.as_deref().unwrap_or_default());
    let chat = state.chat.clone();

    let entries = tokio::spawn(async move { chat.submit(&input.text, language).await })
        .await
        .map_err(|e| AppError::Internal(format!("Conversation turn aborted: {}", e)))??;

    Ok(Json(SendMessageResponse { entries }))
}

/// Get the full transcript
/// GET /chat/transcript
pub async fn get_transcript(State(state): State<AppState>) -> Json<Vec<ConversationEntry>> {
    Json(state.chat.transcript())
}

/// Get the turn state without waiting on an in-flight turn
/// GET /chat/status
pub async fn get_status(State(state): State<AppState>) -> Json<TurnStatusResponse> {
    let turn = state.chat.turn_state();
    Json(TurnStatusResponse {
        state: turn,
        busy: turn.is_busy(),
    })
}
