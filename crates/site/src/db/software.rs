//! Software product repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use iq_geospatial_core::SoftwareProductId;

use super::RepositoryError;
use crate::models::SoftwareProduct;

/// Internal row type for `software_products` queries.
#[derive(Debug, sqlx::FromRow)]
struct SoftwareRow {
    id: i32,
    name: String,
    description: String,
    video_url: Option<String>,
    image_url: Option<String>,
    installer_url: Option<String>,
    documentation_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SoftwareRow> for SoftwareProduct {
    fn from(row: SoftwareRow) -> Self {
        Self {
            id: SoftwareProductId::new(row.id),
            name: row.name,
            description: row.description,
            video_url: row.video_url,
            image_url: row.image_url,
            installer_url: row.installer_url,
            documentation_url: row.documentation_url,
            created_at: row.created_at,
        }
    }
}

/// Changes applied by a create or update of a software row.
#[derive(Debug, Clone)]
pub struct SoftwareChanges<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub video_url: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub installer_url: Option<&'a str>,
    pub documentation_url: Option<&'a str>,
}

/// Repository for software product database operations.
pub struct SoftwareRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SoftwareRepository<'a> {
    /// Create a new software repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all software products in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<SoftwareProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, SoftwareRow>(
            r"
            SELECT id, name, description, video_url, image_url,
                   installer_url, documentation_url, created_at
            FROM software_products
            ORDER BY created_at
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a software product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: SoftwareProductId,
    ) -> Result<Option<SoftwareProduct>, RepositoryError> {
        let row = sqlx::query_as::<_, SoftwareRow>(
            r"
            SELECT id, name, description, video_url, image_url,
                   installer_url, documentation_url, created_at
            FROM software_products
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a new software row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        changes: SoftwareChanges<'_>,
    ) -> Result<SoftwareProduct, RepositoryError> {
        let row = sqlx::query_as::<_, SoftwareRow>(
            r"
            INSERT INTO software_products
                (name, description, video_url, image_url, installer_url, documentation_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, video_url, image_url,
                      installer_url, documentation_url, created_at
            ",
        )
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.video_url)
        .bind(changes.image_url)
        .bind(changes.installer_url)
        .bind(changes.documentation_url)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update an existing software row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: SoftwareProductId,
        changes: SoftwareChanges<'_>,
    ) -> Result<SoftwareProduct, RepositoryError> {
        let row = sqlx::query_as::<_, SoftwareRow>(
            r"
            UPDATE software_products
            SET name = $1, description = $2, video_url = $3, image_url = $4,
                installer_url = $5, documentation_url = $6
            WHERE id = $7
            RETURNING id, name, description, video_url, image_url,
                      installer_url, documentation_url, created_at
            ",
        )
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.video_url)
        .bind(changes.image_url)
        .bind(changes.installer_url)
        .bind(changes.documentation_url)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a software row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: SoftwareProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM software_products
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
