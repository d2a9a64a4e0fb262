//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Route handlers return `Result<T, AppError>`;
//! user-facing messages are derived centrally from the structured error
//! kinds, never from third-party error text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::chat::CompletionError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Object storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Completion API operation failed.
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Input rejected before any remote call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated or not allowed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The user-facing message for this error.
    ///
    /// Internal detail never leaks; the storage and completion kinds map to
    /// specific human messages so admins can tell a policy rejection from an
    /// oversized upload.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Storage(err) => match err {
                StorageError::PayloadTooLarge => {
                    "The file is too large for the storage service. The current bucket limit \
                     is 50MB."
                        .to_string()
                }
                StorageError::PermissionDenied => {
                    "Permission error: the file could not be stored. Check the bucket's \
                     access policies."
                        .to_string()
                }
                _ => "The file could not be stored. Please try again.".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    "Invalid login credentials".to_string()
                }
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::MissingProfile => {
                    "Your account is missing its profile. You have been signed out; please \
                     contact support."
                        .to_string()
                }
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "Authentication error".to_string()
                }
            },
            Self::Completion(_) => "The assistant is unavailable right now.".to_string(),
            Self::Validation(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::NotFound(_) => "Not found".to_string(),
            Self::Unauthorized(_) => "You must be signed in to do that".to_string(),
        }
    }

    /// The HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(err) => match err {
                StorageError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                StorageError::PermissionDenied => StatusCode::FORBIDDEN,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::UserNotFound
                | AuthError::MissingProfile => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Completion(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Storage(_) | Self::Completion(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status(), self.user_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("service-123".to_string());
        assert_eq!(err.to_string(), "Not found: service-123");

        let err = AppError::Validation("Title is required.".to_string());
        assert_eq!(err.to_string(), "Validation error: Title is required.");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Storage(StorageError::PayloadTooLarge).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Storage(StorageError::PermissionDenied).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Unauthorized("x".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_storage_kinds_map_to_specific_messages() {
        // Structured kinds drive the wording, not provider error text
        let msg = AppError::Storage(StorageError::PayloadTooLarge).user_message();
        assert!(msg.contains("50MB"));

        let msg = AppError::Storage(StorageError::PermissionDenied).user_message();
        assert!(msg.contains("policies"));
    }

    #[test]
    fn test_internal_detail_never_leaks() {
        let err = AppError::Internal("connection refused to 10.0.0.3".to_string());
        assert_eq!(err.user_message(), "Internal server error");
    }
}
