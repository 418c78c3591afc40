//! # Encore Infrastructure
//!
//! Concrete implementations of the ports defined in `encore-core`.
//! This crate contains the database, cache, queue, mail, and file-storage
//! integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL catalog store via SeaORM
//! - `redis` - Redis cache and export queue

pub mod cache;
pub mod database;
pub mod mailer;
pub mod queue;
pub mod storage;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use queue::InMemoryExportQueue;

pub use database::DatabaseConnections;
pub use mailer::{HttpMailer, MailRelayConfig};
pub use storage::{FileStorage, StorageConfig, UploadError, UploadMeta};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
#[cfg(feature = "redis")]
pub use queue::{RedisExportQueue, RedisQueueConfig};

#[cfg(feature = "postgres")]
pub use database::PostgresCatalog;
