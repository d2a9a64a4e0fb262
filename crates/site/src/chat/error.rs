//! Error types for the completion API client.

use thiserror::Error;

/// Errors that can occur when calling the completion API.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("completion API error ({status}): {message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Error message from the provider.
        message: String,
    },

    /// Rate limited by the provider.
    #[error("completion API rate limited")]
    RateLimited,

    /// Authentication failed.
    #[error("completion API rejected the credentials")]
    Unauthorized,

    /// The provider returned no usable reply (e.g., content filtered).
    #[error("the model did not produce a reply")]
    MissingReply,
}

/// Error body returned by the completion API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiErrorDetail,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// Error message.
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::Api {
            status: 400,
            message: "max_tokens is too large".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "completion API error (400): max_tokens is too large"
        );
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.message, "Incorrect API key provided");
    }
}
