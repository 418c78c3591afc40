//! Album like counter - cache-aside aggregation over the durable store.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{DomainError, RepoError};
use crate::ports::{Cache, CatalogStore};

/// Default lifetime of a cached like count.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(1800);

/// Where a like count was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    Cache,
    Store,
}

/// Cache-aside like counter.
///
/// The cache is never the writer of truth: counts are computed from like
/// rows on a miss and mirrored into the cache with a bounded TTL, and every
/// write path invalidates (deletes) rather than updates the cached value.
pub struct LikeCounter {
    store: Arc<dyn CatalogStore>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

fn cache_key(album_id: &str) -> String {
    format!("album-likes:{album_id}")
}

impl LikeCounter {
    pub fn new(store: Arc<dyn CatalogStore>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// Read the like count for an album, preferring the cache.
    ///
    /// A cache fault is indistinguishable from a miss: both fall through to
    /// the store, and the recomputed value is written back with the TTL.
    /// Zero is cached like any other value; there is no negative caching.
    pub async fn count(&self, album_id: &str) -> Result<(u64, CountSource), DomainError> {
        let key = cache_key(album_id);

        if let Some(raw) = self.cache.get(&key).await {
            match raw.parse::<u64>() {
                Ok(count) => return Ok((count, CountSource::Cache)),
                Err(_) => {
                    // Corrupt entry: treat as a miss and recompute.
                    tracing::warn!(album_id, "discarding unparseable cached like count");
                }
            }
        }

        let count = self.store.count_album_likes(album_id).await?;

        if let Err(err) = self
            .cache
            .set(&key, &count.to_string(), Some(self.ttl))
            .await
        {
            tracing::warn!(album_id, error = %err, "failed to cache like count");
        }

        Ok((count, CountSource::Store))
    }

    /// Record a like for (album, user).
    ///
    /// The application-level duplicate check fails fast with `Conflict`; the
    /// store's unique index is the real guard, so a constraint violation from
    /// a racing insert maps to `Conflict` as well. The cache entry is deleted
    /// only after the insert has committed - invalidating first would let a
    /// concurrent reader repopulate the cache with the pre-write count.
    pub async fn like(&self, album_id: &str, user_id: &str) -> Result<(), DomainError> {
        if !self.store.album_exists(album_id).await? {
            return Err(DomainError::NotFound {
                entity: "album",
                id: album_id.to_string(),
            });
        }

        if self.store.has_album_like(album_id, user_id).await? {
            return Err(DomainError::Conflict("album already liked".to_string()));
        }

        match self.store.insert_album_like(album_id, user_id).await {
            Ok(()) => {}
            Err(RepoError::Constraint(_)) => {
                return Err(DomainError::Conflict("album already liked".to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        self.invalidate(album_id).await;
        Ok(())
    }

    /// Remove a like for (album, user). Fails with `InvariantViolation` when
    /// no matching like-edge exists.
    pub async fn unlike(&self, album_id: &str, user_id: &str) -> Result<(), DomainError> {
        let deleted = self.store.delete_album_like(album_id, user_id).await?;
        if !deleted {
            return Err(DomainError::InvariantViolation(
                "album was not liked".to_string(),
            ));
        }

        self.invalidate(album_id).await;
        Ok(())
    }

    /// Drop the cached count after a committed write. A failed delete leaves
    /// a stale value bounded by the TTL, which is logged but never surfaced.
    async fn invalidate(&self, album_id: &str) {
        if let Err(err) = self.cache.delete(&cache_key(album_id)).await {
            tracing::warn!(album_id, error = %err, "failed to invalidate like count cache");
        }
    }
}
