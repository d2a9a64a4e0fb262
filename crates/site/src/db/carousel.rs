//! Homepage carousel repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use iq_geospatial_core::CarouselImageId;

use super::RepositoryError;
use crate::models::CarouselImage;

/// Internal row type for `homepage_carousel` queries.
#[derive(Debug, sqlx::FromRow)]
struct CarouselRow {
    id: i32,
    image_url: String,
    alt_text: String,
    created_at: DateTime<Utc>,
}

impl From<CarouselRow> for CarouselImage {
    fn from(row: CarouselRow) -> Self {
        Self {
            id: CarouselImageId::new(row.id),
            image_url: row.image_url,
            alt_text: row.alt_text,
            created_at: row.created_at,
        }
    }
}

/// Repository for carousel image database operations.
pub struct CarouselRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CarouselRepository<'a> {
    /// Create a new carousel repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all carousel images in rotation order (creation time).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CarouselImage>, RepositoryError> {
        let rows = sqlx::query_as::<_, CarouselRow>(
            r"
            SELECT id, image_url, alt_text, created_at
            FROM homepage_carousel
            ORDER BY created_at
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a carousel image by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: CarouselImageId,
    ) -> Result<Option<CarouselImage>, RepositoryError> {
        let row = sqlx::query_as::<_, CarouselRow>(
            r"
            SELECT id, image_url, alt_text, created_at
            FROM homepage_carousel
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a new carousel image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        image_url: &str,
        alt_text: &str,
    ) -> Result<CarouselImage, RepositoryError> {
        let row = sqlx::query_as::<_, CarouselRow>(
            r"
            INSERT INTO homepage_carousel (image_url, alt_text)
            VALUES ($1, $2)
            RETURNING id, image_url, alt_text, created_at
            ",
        )
        .bind(image_url)
        .bind(alt_text)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a carousel image row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CarouselImageId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM homepage_carousel
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
