//! Service domain type.

use chrono::{DateTime, Utc};

use iq_geospatial_core::ServiceId;

/// A geospatial service offered by the company (domain type).
///
/// The `image_url` points at an object in the `services/` prefix of the
/// site-assets bucket; the object is co-owned with the row and removed when
/// the row is deleted.
#[derive(Debug, Clone)]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
