//! Object storage integration.
//!
//! All uploaded site assets live in a single bucket, keyed by per-entity
//! path prefixes:
//!
//! - `services/` - service card images
//! - `software-images/` - software product images
//! - `software-installers/` - uploaded installers (capped at 50 MB)
//! - `software-docs/` - documentation PDFs
//! - `carousel/` - home page carousel images
//!
//! Object names are timestamp-based with a short random suffix so repeated
//! uploads of the same filename never collide.

mod client;
mod error;

pub use client::StorageClient;
pub use error::StorageError;

use rand::Rng;
use rand::distr::Alphanumeric;

/// Path prefix for service images.
pub const SERVICES_PREFIX: &str = "services";
/// Path prefix for software product images.
pub const SOFTWARE_IMAGES_PREFIX: &str = "software-images";
/// Path prefix for software installers.
pub const SOFTWARE_INSTALLERS_PREFIX: &str = "software-installers";
/// Path prefix for software documentation.
pub const SOFTWARE_DOCS_PREFIX: &str = "software-docs";
/// Path prefix for carousel images.
pub const CAROUSEL_PREFIX: &str = "carousel";

/// Build a unique object path for an upload.
///
/// The name is the upload timestamp in milliseconds plus a short random
/// suffix, keeping the original file extension:
/// `services/1722860000000-k3xf.png`.
#[must_use]
pub fn unique_object_name(prefix: &str, original_filename: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(char::from)
        .collect();

    let extension = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase());

    match extension {
        Some(ext) if !ext.is_empty() => format!("{prefix}/{timestamp}-{suffix}.{ext}"),
        _ => format!("{prefix}/{timestamp}-{suffix}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_object_name_keeps_extension() {
        let name = unique_object_name(SERVICES_PREFIX, "Photo.JPG");
        assert!(name.starts_with("services/"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_unique_object_name_without_extension() {
        let name = unique_object_name(SOFTWARE_INSTALLERS_PREFIX, "installer");
        assert!(name.starts_with("software-installers/"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_unique_object_names_differ() {
        let a = unique_object_name(CAROUSEL_PREFIX, "a.png");
        let b = unique_object_name(CAROUSEL_PREFIX, "a.png");
        assert_ne!(a, b);
    }
}
