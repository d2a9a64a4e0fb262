//! Profile repository for database operations.
//!
//! Covers both the `users` authentication table and the one-to-one
//! `profiles` table. Registration provisions both rows in a single
//! transaction; role management and user deletion are the administrative
//! operations the admin panel calls.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use iq_geospatial_core::{Email, ProfileId, UserRole};

use super::RepositoryError;
use crate::models::Profile;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for profile queries.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: String,
    role: UserRole,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: ProfileId::new(row.id),
            email,
            role: row.role,
            created_at: row.created_at,
        })
    }
}

/// Internal row type for credential lookups (profile + password hash).
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    email: String,
    role: UserRole,
    created_at: DateTime<Utc>,
    password_hash: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user and profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users joined with their profiles, newest first.
    ///
    /// This is the administrative listing used by the user management panel;
    /// it goes through the `users` join rather than a bare `profiles` read so
    /// accounts whose profile row is missing are excluded the same way the
    /// login consistency check treats them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all_with_profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT p.id, p.email, p.role, p.created_at
            FROM profiles p
            JOIN users u ON u.id = p.id
            ORDER BY p.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a profile by user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: ProfileId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, email, role, created_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a profile by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, email, role, created_at
            FROM profiles
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Look up the password hash for an email, along with the profile.
    ///
    /// Returns `None` if no such user exists. A user row without a matching
    /// profile row also returns `None` here; the caller treats that as a
    /// consistency error and forces sign-out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(Profile, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r"
            SELECT p.id, p.email, p.role, p.created_at, u.password_hash
            FROM users u
            JOIN profiles p ON p.id = u.id
            WHERE u.email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let email = Email::parse(&r.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let profile = Profile {
            id: ProfileId::new(r.id),
            email,
            role: r.role,
            created_at: r.created_at,
        };

        Ok(Some((profile, r.password_hash)))
    }

    /// Whether a user row exists without its profile row.
    ///
    /// Used by the login flow to distinguish "unknown account" from the
    /// critical half-provisioned state that forces a sign-out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn user_exists_without_profile(
        &self,
        email: &Email,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM users u
                LEFT JOIN profiles p ON p.id = u.id
                WHERE u.email = $1 AND p.id IS NULL
            )
            ",
        )
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Create a user and its profile in one transaction.
    ///
    /// The profile row is provisioned automatically with the `user` role;
    /// handlers never insert into `profiles` directly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<Profile, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(id)
        .bind(email.as_str())
        .bind(password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO profiles (id, email, role)
            VALUES ($1, $2, 'user')
            RETURNING id, email, role, created_at
            ",
        )
        .bind(id)
        .bind(email.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }

    /// Update a user's role.
    ///
    /// The role arrives as a typed [`UserRole`], so only the three
    /// enumerated values can ever reach this query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_role(
        &self,
        id: ProfileId,
        role: UserRole,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            UPDATE profiles
            SET role = $1
            WHERE id = $2
            RETURNING id, email, role, created_at
            ",
        )
        .bind(role)
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a user by their ID.
    ///
    /// The profile row and sessions cascade with the user row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: ProfileId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
