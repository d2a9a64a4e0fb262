//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! iqgs-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string
//!
//! Migration files live in `crates/site/migrations/` and are embedded into
//! the binary at compile time.

use iq_geospatial_site::db::create_pool;

use super::{CommandError, database_url};

/// Run the site database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to the site database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
