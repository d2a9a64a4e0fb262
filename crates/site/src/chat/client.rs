//! Completion API client.
//!
//! Non-streaming client for the hosted chat-completion endpoint. One call
//! per relay request; no conversation state is kept between calls.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ChatConfig;

use super::error::{ApiErrorResponse, CompletionError};
use super::types::{ChatMessage, CompletionRequest, CompletionResponse};

/// Reply length cap forwarded to the provider.
const MAX_TOKENS: u32 = 256;
/// Sampling temperature forwarded to the provider.
const TEMPERATURE: f32 = 0.7;

/// Completion API client.
#[derive(Clone)]
pub struct CompletionClient {
    inner: Arc<CompletionClientInner>,
}

struct CompletionClientInner {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl CompletionClient {
    /// Create a new completion client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &ChatConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_value =
            HeaderValue::from_str(&bearer).expect("Invalid completion API key for header");
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(CompletionClientInner {
                client,
                api_url: config.api_url.clone(),
                model: config.model.clone(),
            }),
        }
    }

    /// Send a conversation and return the single reply string.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the provider rejects it, or
    /// the response carries no reply text.
    #[instrument(skip(self, messages), fields(model = %self.inner.model, messages = messages.len()))]
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: self.inner.model.clone(),
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, response).await);
        }

        let body: CompletionResponse = response.json().await?;
        let reply = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|reply| !reply.is_empty())
            .ok_or(CompletionError::MissingReply)?;

        Ok(reply)
    }

    /// Map an error response to a structured error kind.
    async fn error_from_response(
        status: StatusCode,
        response: reqwest::Response,
    ) -> CompletionError {
        match status {
            StatusCode::UNAUTHORIZED => CompletionError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited,
            _ => {
                let message = match response.json::<ApiErrorResponse>().await {
                    Ok(body) => body.error.message,
                    Err(_) => "unreadable error response".to_string(),
                };
                CompletionError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
