//! Chat relay endpoint.
//!
//! Stateless pass-through between the browser chat widget and the hosted
//! completion API. The client resends its whole (transient) history every
//! turn; the server enforces the history cap, prepends the system prompt
//! and returns the single reply string.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::chat::{ChatMessage, build_completion_messages};
use crate::state::AppState;

/// Relay request body.
#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    pub messages: Vec<ChatMessage>,
}

/// Relay success body.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Relay error body.
#[derive(Debug, Serialize)]
pub struct ChatErrorBody {
    pub error: String,
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ChatErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Forward a conversation to the completion API.
///
/// POST /api/chat
///
/// Requires `Authorization: Bearer <relay token>`. The 8-message history
/// cap is enforced here regardless of how much the client sends.
#[instrument(skip(state, headers, payload), fields(messages = payload.messages.len()))]
pub async fn relay(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatPayload>,
) -> Response {
    let expected = state.config().chat.relay_token.expose_secret();
    if bearer_token(&headers) != Some(expected) {
        return error_response(StatusCode::UNAUTHORIZED, "Missing or invalid bearer token.");
    }

    if payload.messages.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "The messages field is required.");
    }

    let messages = build_completion_messages(&payload.messages);

    match state.completions().complete(messages).await {
        Ok(reply) => Json(ChatReply { reply }).into_response(),
        Err(e) => {
            tracing::error!("chat relay failed: {e}");
            error_response(
                StatusCode::BAD_GATEWAY,
                "The assistant is unavailable right now.",
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer tok123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("tok123"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
