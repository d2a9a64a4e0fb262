//! Service repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use iq_geospatial_core::ServiceId;

use super::RepositoryError;
use crate::models::Service;

/// Internal row type for `services_offered` queries.
#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: i32,
    title: String,
    description: String,
    category: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: ServiceId::new(row.id),
            title: row.title,
            description: row.description,
            category: row.category,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Changes applied by a create or update of a service row.
#[derive(Debug, Clone)]
pub struct ServiceChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub image_url: Option<&'a str>,
}

/// Repository for service database operations.
pub struct ServiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceRepository<'a> {
    /// Create a new service repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all services in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Service>, RepositoryError> {
        let rows = sqlx::query_as::<_, ServiceRow>(
            r"
            SELECT id, title, description, category, image_url, created_at
            FROM services_offered
            ORDER BY created_at
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a service by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceRow>(
            r"
            SELECT id, title, description, category, image_url, created_at
            FROM services_offered
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a new service row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, changes: ServiceChanges<'_>) -> Result<Service, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceRow>(
            r"
            INSERT INTO services_offered (title, description, category, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, category, image_url, created_at
            ",
        )
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.category)
        .bind(changes.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update an existing service row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ServiceId,
        changes: ServiceChanges<'_>,
    ) -> Result<Service, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceRow>(
            r"
            UPDATE services_offered
            SET title = $1, description = $2, category = $3, image_url = $4
            WHERE id = $5
            RETURNING id, title, description, category, image_url, created_at
            ",
        )
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.category)
        .bind(changes.image_url)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a service row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM services_offered
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
