use async_trait::async_trait;

use crate::domain::Playlist;
use crate::error::RepoError;

/// Durable-store port for the catalog entities the core services touch.
///
/// Each operation is an individually atomic point query; no multi-statement
/// transaction is assumed across calls.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn album_exists(&self, album_id: &str) -> Result<bool, RepoError>;

    /// Count distinct like-edges for an album. Unknown albums count zero.
    async fn count_album_likes(&self, album_id: &str) -> Result<u64, RepoError>;

    /// Fast-fail pre-check for a duplicate like. The store's unique index on
    /// (album_id, user_id) is the actual correctness guarantee; this only
    /// exists to return a friendly error before attempting the insert.
    async fn has_album_like(&self, album_id: &str, user_id: &str) -> Result<bool, RepoError>;

    /// Insert a like-edge. Returns `RepoError::Constraint` when the unique
    /// index rejects a concurrent duplicate.
    async fn insert_album_like(&self, album_id: &str, user_id: &str) -> Result<(), RepoError>;

    /// Delete a like-edge. Returns `false` when no matching edge existed.
    async fn delete_album_like(&self, album_id: &str, user_id: &str) -> Result<bool, RepoError>;

    /// Fetch a playlist together with its songs, in playlist order.
    async fn playlist_with_songs(&self, playlist_id: &str) -> Result<Option<Playlist>, RepoError>;

    /// Persist the public cover URL on an album. Returns `false` when the
    /// album no longer exists.
    async fn update_album_cover(&self, album_id: &str, cover_url: &str) -> Result<bool, RepoError>;
}
