use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: i64,
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub session_id: String,
    pub appointment_created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<i64>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let session_id = payload
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    tracing::info!(session = %session_id, user = payload.user_id, "processing chat message");

    match conversation::process_message(&state, &session_id, payload.user_id, &message).await {
        Ok(reply) => Ok(Json(ChatResponse {
            message: reply.message,
            session_id,
            appointment_created: reply.appointment_created,
            appointment_id: reply.appointment_id,
        })),
        Err(e) => {
            // Conversational UX is preserved on upstream failure: the user
            // gets an apology reply rather than an HTTP error.
            tracing::error!(error = %e, session = %session_id, "chat processing failed");
            Ok(Json(ChatResponse {
                message: "I apologize, but I'm having trouble responding right now. Please try again in a moment.".to_string(),
                session_id,
                appointment_created: false,
                appointment_id: None,
            }))
        }
    }
}
