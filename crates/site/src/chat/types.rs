//! Request/response types for the completion API.

use serde::{Deserialize, Serialize};

use iq_geospatial_core::ChatRole;

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who produced the message.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    /// Model ID.
    pub model: String,
    /// Conversation (system prompt first).
    pub messages: Vec<ChatMessage>,
    /// Hard cap on the reply length.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Response body from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    /// Candidate replies; only the first is used.
    pub choices: Vec<CompletionChoice>,
}

/// One candidate reply.
#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    /// The reply message.
    pub message: ChatMessage,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hello!"},
                    "finish_reason": "stop"
                }
            ]
        }"#;

        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.role, ChatRole::Assistant);
        assert_eq!(response.choices[0].message.content, "Hello!");
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: ChatRole::User,
                content: "hi".to_string(),
            }],
            max_tokens: 256,
            temperature: 0.7,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 256);
    }
}
