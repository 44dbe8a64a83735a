//! Shopping-assistant chat handler.
//!
//! `POST /api/chat` with `{"conversationHistory": [...]}`. Some storefront
//! pages post the body as a JSON-encoded string instead of an object, so the
//! body is read as raw bytes and both forms are accepted regardless of
//! `Content-Type`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;

use shop_core::conversation::ConversationMessage;
use shop_core::prompt::build_prompt;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::ChatResponse;

/// `POST /api/chat` — augment the conversation with catalog context and
/// return the assistant reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let history = parse_history(&body)?;
    let messages = build_prompt(&history, &state.catalog)?;
    let reply = state.completion.complete(&messages).await?;
    Ok(Json(ChatResponse { reply }))
}

/// Extracts `conversationHistory` from an object body or a string-encoded one.
fn parse_history(body: &[u8]) -> Result<Vec<ConversationMessage>, AppError> {
    let invalid_json = || AppError::InvalidRequest("Nieprawidłowy format JSON.".into());

    let mut value = match serde_json::from_slice::<Value>(body).map_err(|_| invalid_json())? {
        Value::String(encoded) => serde_json::from_str(&encoded).map_err(|_| invalid_json())?,
        other => other,
    };

    let history = match value.get_mut("conversationHistory").map(Value::take) {
        Some(history) if !history.is_null() => history,
        _ => {
            return Err(AppError::InvalidRequest(
                "Brak 'conversationHistory' w zapytaniu.".into(),
            ));
        }
    };

    serde_json::from_value(history).map_err(|e| {
        AppError::InvalidRequest(format!("Nieprawidłowa 'conversationHistory': {e}"))
    })
}
