//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::{HttpRedirectResolver, StorageClient};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    maps_resolver: HttpRedirectResolver,
    storage: Option<StorageClient>,
}

impl AppState {
    /// Build state from configuration and a database pool.
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP client fails to build.
    pub fn new(config: AdminConfig, pool: PgPool) -> Result<Self, reqwest::Error> {
        let maps_resolver = HttpRedirectResolver::new(config.maps_resolve_timeout)?;
        let storage = match config.storage() {
            Some(storage_config) => Some(StorageClient::new(
                storage_config,
                reqwest::Client::builder().build()?,
            )),
            None => None,
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                maps_resolver,
                storage,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Resolver for shortened map links.
    #[must_use]
    pub fn maps_resolver(&self) -> &HttpRedirectResolver {
        &self.inner.maps_resolver
    }

    /// Storage client, if image uploads are configured.
    #[must_use]
    pub fn storage(&self) -> Option<&StorageClient> {
        self.inner.storage.as_ref()
    }
}
