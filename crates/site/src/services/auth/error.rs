//! Error types for the authentication service.

use thiserror::Error;

use iq_geospatial_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the email.
    #[error("user not found")]
    UserNotFound,

    /// An account already exists for the email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The password doesn't meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A user row exists but its profile row is gone.
    ///
    /// This is the critical half-provisioned state; callers must destroy
    /// the session rather than continue half-authenticated.
    #[error("account has no profile")]
    MissingProfile,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
