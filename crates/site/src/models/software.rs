//! Software product domain type.

use chrono::{DateTime, Utc};

use iq_geospatial_core::SoftwareProductId;

/// A desktop software product in the catalog (domain type).
///
/// Up to three associated uploads (image, installer, documentation); the
/// installer may instead be an externally-hosted URL when the binary is
/// larger than the upload limit. `video_url` is always external.
#[derive(Debug, Clone)]
pub struct SoftwareProduct {
    pub id: SoftwareProductId,
    pub name: String,
    pub description: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub installer_url: Option<String>,
    pub documentation_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SoftwareProduct {
    /// The stored file URLs that may reference objects in the site bucket.
    #[must_use]
    pub fn file_urls(&self) -> Vec<&str> {
        [
            self.image_url.as_deref(),
            self.installer_url.as_deref(),
            self.documentation_url.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product() -> SoftwareProduct {
        SoftwareProduct {
            id: SoftwareProductId::new(1),
            name: "TerraMapper".to_string(),
            description: String::new(),
            video_url: Some("https://youtube.com/watch?v=abc".to_string()),
            image_url: None,
            installer_url: None,
            documentation_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_file_urls_skips_unset_fields() {
        let mut p = product();
        assert!(p.file_urls().is_empty());

        p.image_url = Some("https://storage.test/object/public/site-assets/software-images/a.png".to_string());
        p.documentation_url = Some("https://storage.test/object/public/site-assets/software-docs/a.pdf".to_string());
        assert_eq!(p.file_urls().len(), 2);
    }

    #[test]
    fn test_file_urls_excludes_video() {
        // video_url is always external and never part of the bucket cleanup
        let p = product();
        assert!(p.file_urls().is_empty());
    }
}
