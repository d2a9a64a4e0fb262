//! Object storage client.
//!
//! Thin client for the S3-compatible storage service holding all uploaded
//! site assets. Uploads return the object's public URL, which is what the
//! database rows store; deletion derives the object path back out of that
//! URL.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::StorageConfig;

use super::error::StorageError;

/// Client for the object storage service.
///
/// Cheaply cloneable; holds the bucket name and a reqwest client with the
/// service credential installed as a default header.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl StorageClient {
    /// Create a new storage client.
    ///
    /// # Panics
    ///
    /// Panics if the service key contains invalid header characters.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.service_key.expose_secret());
        let mut auth_value =
            HeaderValue::from_str(&bearer).expect("Invalid storage service key for header");
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(StorageClientInner {
                client,
                endpoint: config.endpoint.clone(),
                bucket: config.bucket.clone(),
            }),
        }
    }

    /// Upload an object and return its public URL.
    ///
    /// # Arguments
    ///
    /// * `path` - Object path inside the bucket (e.g., `services/17228-x3.png`)
    /// * `content_type` - MIME type of the payload
    /// * `bytes` - Object content
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] kind derived from the response status.
    #[instrument(skip(self, bytes), fields(bucket = %self.inner.bucket, size = bytes.len()))]
    pub async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let url = format!(
            "{}/object/{}/{}",
            self.inner.endpoint, self.inner.bucket, path
        );

        let response = self
            .inner
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response).await?;

        Ok(self.public_url(path))
    }

    /// Delete one object from the bucket.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] kind derived from the response status.
    #[instrument(skip(self), fields(bucket = %self.inner.bucket))]
    pub async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let url = format!(
            "{}/object/{}/{}",
            self.inner.endpoint, self.inner.bucket, path
        );

        let response = self.inner.client.delete(&url).send().await?;
        Self::check_status(response).await?;

        Ok(())
    }

    /// Best-effort removal of the objects behind a set of stored URLs.
    ///
    /// Every URL that resolves to a bucket path gets exactly one removal
    /// attempt; failures are logged and returned but never short-circuit
    /// the remaining removals.
    pub async fn remove_urls(&self, urls: &[&str]) -> Vec<StorageError> {
        let mut failures = Vec::new();

        for url in urls {
            let path = match self.object_path(url) {
                Ok(path) => path,
                Err(e) => {
                    // Externally-hosted URLs (e.g., an installer linked from
                    // elsewhere) are not ours to delete.
                    tracing::debug!(url, "skipping non-bucket URL: {e}");
                    continue;
                }
            };

            if let Err(e) = self.remove(&path).await {
                tracing::warn!(path, "failed to remove object: {e}");
                failures.push(e);
            }
        }

        failures
    }

    /// The public URL for an object path.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.inner.endpoint, self.inner.bucket, path
        )
    }

    /// Derive the bucket-relative object path from a stored public URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ForeignUrl`] if the URL does not point at a
    /// public object in this client's bucket.
    pub fn object_path(&self, url: &str) -> Result<String, StorageError> {
        let parsed =
            url::Url::parse(url).map_err(|_| StorageError::ForeignUrl(url.to_string()))?;

        let marker = format!("/object/public/{}/", self.inner.bucket);
        parsed
            .path()
            .split_once(&marker)
            .map(|(_, path)| path.to_string())
            .filter(|path| !path.is_empty())
            .ok_or_else(|| StorageError::ForeignUrl(url.to_string()))
    }

    /// Map an error status to a structured error kind.
    async fn check_status(response: reqwest::Response) -> Result<(), StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        match status {
            StatusCode::PAYLOAD_TOO_LARGE => Err(StorageError::PayloadTooLarge),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StorageError::PermissionDenied)
            }
            StatusCode::NOT_FOUND => Err(StorageError::NotFound),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(StorageError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn client() -> StorageClient {
        StorageClient::new(&StorageConfig {
            endpoint: "https://storage.iqgeospatial.com".to_string(),
            bucket: "site-assets".to_string(),
            service_key: SecretString::from("k"),
        })
    }

    #[test]
    fn test_public_url_shape() {
        let client = client();
        assert_eq!(
            client.public_url("services/1722-ab.png"),
            "https://storage.iqgeospatial.com/object/public/site-assets/services/1722-ab.png"
        );
    }

    #[test]
    fn test_object_path_roundtrip() {
        let client = client();
        let url = client.public_url("software-docs/1722-cd.pdf");
        assert_eq!(client.object_path(&url).unwrap(), "software-docs/1722-cd.pdf");
    }

    #[test]
    fn test_object_path_rejects_foreign_urls() {
        let client = client();
        for url in [
            "https://drive.google.com/file/d/abc",
            "https://storage.iqgeospatial.com/object/public/other-bucket/a.png",
            "https://storage.iqgeospatial.com/object/public/site-assets/",
            "not a url",
        ] {
            assert!(
                matches!(client.object_path(url), Err(StorageError::ForeignUrl(_))),
                "{url:?} must not resolve to a bucket path"
            );
        }
    }
}
