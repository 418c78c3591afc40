//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use encore_infra::database::DatabaseConfig;
use encore_infra::storage::StorageConfig;

/// Default lifetime of a cached like count.
const DEFAULT_LIKES_TTL_SECS: u64 = 1800;

/// Content types accepted for album cover uploads.
pub const ALLOWED_COVER_TYPES: &[&str] = &[
    "image/apng",
    "image/avif",
    "image/gif",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL stamped onto uploaded cover links.
    pub public_base_url: String,
    pub likes_cache_ttl: Duration,
    pub storage: StorageConfig,
    pub database: Option<DatabaseConfig>,
    /// Set when REDIS_URL is present; otherwise in-memory fallbacks are used.
    pub redis_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://{host}:{port}")),
            host,
            port,
            likes_cache_ttl: Duration::from_secs(
                env::var("LIKES_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_LIKES_TTL_SECS),
            ),
            storage: StorageConfig::from_env(),
            database: DatabaseConfig::from_env(),
            redis_url: env::var("REDIS_URL").ok(),
        }
    }
}
