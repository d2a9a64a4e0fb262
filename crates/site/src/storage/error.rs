//! Error types for the object storage client.

use thiserror::Error;

/// Errors that can occur when talking to the object storage service.
///
/// The service's failure modes are carried as structured kinds derived from
/// the HTTP status, so callers and the central error mapping never have to
/// inspect the provider's message text.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The object exceeded the service's size limit.
    #[error("object exceeds the storage size limit")]
    PayloadTooLarge,

    /// The service key was rejected or a bucket policy denied the operation.
    #[error("storage permission denied")]
    PermissionDenied,

    /// The object or bucket does not exist.
    #[error("object not found")]
    NotFound,

    /// Any other error response from the service.
    #[error("storage error ({status}): {message}")]
    Api {
        /// HTTP status returned by the service.
        status: u16,
        /// Response body, for the logs.
        message: String,
    },

    /// A stored URL does not point into the configured bucket.
    #[error("not a bucket URL: {0}")]
    ForeignUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::PayloadTooLarge;
        assert_eq!(err.to_string(), "object exceeds the storage size limit");

        let err = StorageError::Api {
            status: 500,
            message: "internal".to_string(),
        };
        assert_eq!(err.to_string(), "storage error (500): internal");
    }
}
