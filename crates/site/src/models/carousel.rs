//! Homepage carousel domain type.

use chrono::{DateTime, Utc};

use iq_geospatial_core::CarouselImageId;

/// An image in the homepage carousel (domain type).
///
/// Rotation order on the home page follows `created_at`.
#[derive(Debug, Clone)]
pub struct CarouselImage {
    pub id: CarouselImageId,
    pub image_url: String,
    pub alt_text: String,
    pub created_at: DateTime<Utc>,
}
