//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use encore_core::ports::{Cache, CatalogStore, ExportQueue};
use encore_core::services::{ExportProducer, LikeCounter};
use encore_infra::cache::InMemoryCache;
use encore_infra::queue::InMemoryExportQueue;
use encore_infra::storage::FileStorage;

#[cfg(feature = "postgres")]
use encore_infra::database::{DatabaseConnections, PostgresCatalog};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub likes: Arc<LikeCounter>,
    pub exports: Arc<ExportProducer>,
    pub catalog: Arc<dyn CatalogStore>,
    pub storage: Arc<FileStorage>,
    pub config: AppConfig,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: AppConfig) -> io::Result<Self> {
        let catalog = Self::init_catalog(&config).await?;
        let cache = Self::init_cache(&config).await;
        let queue = Self::init_queue(&config).await;

        let storage = Arc::new(FileStorage::new(config.storage.clone()).await?);
        let likes = Arc::new(LikeCounter::new(
            catalog.clone(),
            cache,
            config.likes_cache_ttl,
        ));
        let exports = Arc::new(ExportProducer::new(queue));

        tracing::info!("Application state initialized");

        Ok(Self {
            likes,
            exports,
            catalog,
            storage,
            config,
        })
    }

    #[cfg(feature = "postgres")]
    async fn init_catalog(config: &AppConfig) -> io::Result<Arc<dyn CatalogStore>> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| io::Error::other("DATABASE_URL is not set"))?;

        let connections = DatabaseConnections::init(db_config)
            .await
            .map_err(io::Error::other)?;
        Ok(Arc::new(PostgresCatalog::new(connections.main)))
    }

    #[cfg(not(feature = "postgres"))]
    async fn init_catalog(_config: &AppConfig) -> io::Result<Arc<dyn CatalogStore>> {
        Err(io::Error::other(
            "built without the postgres feature; no catalog store available",
        ))
    }

    async fn init_cache(config: &AppConfig) -> Arc<dyn Cache> {
        #[cfg(feature = "redis")]
        if config.redis_url.is_some() {
            match encore_infra::cache::RedisCache::from_env().await {
                Ok(cache) => return Arc::new(cache),
                Err(e) => {
                    tracing::error!(error = %e, "Redis cache unavailable, falling back to in-memory");
                }
            }
        }

        #[cfg(not(feature = "redis"))]
        let _ = config;

        tracing::warn!("Using in-memory like-count cache (lost on restart)");
        Arc::new(InMemoryCache::new())
    }

    async fn init_queue(config: &AppConfig) -> Arc<dyn ExportQueue> {
        #[cfg(feature = "redis")]
        if config.redis_url.is_some() {
            match encore_infra::queue::RedisExportQueue::from_env().await {
                Ok(queue) => return Arc::new(queue),
                Err(e) => {
                    tracing::error!(error = %e, "Redis queue unavailable, falling back to in-memory");
                }
            }
        }

        #[cfg(not(feature = "redis"))]
        let _ = config;

        // Process-local queue: a separate export-worker cannot see these
        // jobs, so exports submitted here go nowhere outside tests.
        tracing::warn!("Using in-memory export queue (process-local, lost on restart)");
        Arc::new(InMemoryExportQueue::default())
    }
}
