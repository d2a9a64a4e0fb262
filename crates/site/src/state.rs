//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::chat::CompletionClient;
use crate::config::SiteConfig;
use crate::storage::StorageClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool, the object storage client and
/// the completion client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    storage: StorageClient,
    completions: CompletionClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SiteConfig, pool: PgPool) -> Self {
        let storage = StorageClient::new(&config.storage);
        let completions = CompletionClient::new(&config.chat);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                storage,
                completions,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the object storage client.
    #[must_use]
    pub fn storage(&self) -> &StorageClient {
        &self.inner.storage
    }

    /// Get a reference to the completion API client.
    #[must_use]
    pub fn completions(&self) -> &CompletionClient {
        &self.inner.completions
    }
}
