//! Redis export queue using a pending/processing list pair.
//!
//! `enqueue` pushes onto `{queue}:pending`; `dequeue` moves one entry to
//! `{queue}:processing` with BLMOVE, and `ack` removes it from there. An
//! entry that a crashed worker never acked stays on the processing list and
//! can be pushed back for redelivery, which is what makes the pipeline
//! at-least-once rather than at-most-once.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Direction};

use encore_core::domain::ExportJob;
use encore_core::ports::{Delivery, ExportQueue, QueueError};

use crate::cache::RedisConfig;

/// Redis export queue configuration.
#[derive(Debug, Clone)]
pub struct RedisQueueConfig {
    /// Redis connection config
    pub redis: RedisConfig,
    /// Queue name/key prefix
    pub queue_name: String,
    /// Timeout for blocking pop (seconds)
    pub pop_timeout: u64,
}

impl Default for RedisQueueConfig {
    fn default() -> Self {
        Self {
            redis: RedisConfig::default(),
            queue_name: "export:playlists".to_string(),
            pop_timeout: 5,
        }
    }
}

impl RedisQueueConfig {
    pub fn from_env() -> Self {
        Self {
            redis: RedisConfig::from_env(),
            queue_name: std::env::var("EXPORT_QUEUE_NAME")
                .unwrap_or_else(|_| "export:playlists".to_string()),
            pop_timeout: std::env::var("EXPORT_QUEUE_POP_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }
}

/// Redis-backed export queue.
pub struct RedisExportQueue {
    conn: ConnectionManager,
    config: RedisQueueConfig,
}

impl RedisExportQueue {
    pub async fn new(config: RedisQueueConfig) -> Result<Self, QueueError> {
        let client = Client::open(config.redis.url.as_str())
            .map_err(|e| QueueError::Backend(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.redis.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| QueueError::Backend("Connection timed out".to_string()))?
            .map_err(|e| QueueError::Backend(e.to_string()))?;

        tracing::info!(
            url = %config.redis.url,
            queue = %config.queue_name,
            "Connected to Redis export queue"
        );

        Ok(Self { conn, config })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, QueueError> {
        Self::new(RedisQueueConfig::from_env()).await
    }

    fn pending_key(&self) -> String {
        format!("{}:pending", self.config.queue_name)
    }

    fn processing_key(&self) -> String {
        format!("{}:processing", self.config.queue_name)
    }

    /// Push entries a crashed worker left on the processing list back onto
    /// the pending list. Called once at worker startup, before consuming.
    pub async fn requeue_in_flight(&self) -> Result<usize, QueueError> {
        let mut conn = self.conn.clone();
        let mut moved = 0usize;

        loop {
            let entry: Option<String> = conn
                .lmove(
                    self.processing_key(),
                    self.pending_key(),
                    Direction::Right,
                    Direction::Left,
                )
                .await
                .map_err(|e| QueueError::Backend(e.to_string()))?;

            if entry.is_none() {
                break;
            }
            moved += 1;
        }

        if moved > 0 {
            tracing::warn!(queue = %self.config.queue_name, moved, "requeued in-flight jobs for redelivery");
        }
        Ok(moved)
    }
}

#[async_trait]
impl ExportQueue for RedisExportQueue {
    async fn enqueue(&self, job: ExportJob) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        let payload =
            serde_json::to_string(&job).map_err(|e| QueueError::Enqueue(e.to_string()))?;

        conn.rpush::<_, _, ()>(self.pending_key(), &payload)
            .await
            .map_err(|e| QueueError::Backend(e.to_string()))?;

        tracing::debug!(job_id = %job.id, playlist_id = %job.playlist_id, "Export job enqueued");
        Ok(())
    }

    async fn dequeue(&self) -> Result<Delivery, QueueError> {
        let mut conn = self.conn.clone();

        loop {
            let entry: Result<Option<String>, _> = conn
                .blmove(
                    self.pending_key(),
                    self.processing_key(),
                    Direction::Left,
                    Direction::Right,
                    self.config.pop_timeout as f64,
                )
                .await;

            let payload = match entry {
                Ok(Some(payload)) => payload,
                Ok(None) => continue, // Timeout, loop again
                Err(e) => {
                    tracing::error!(error = %e, "Redis BLMOVE error");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };

            match serde_json::from_str::<ExportJob>(&payload) {
                Ok(job) => {
                    // The raw payload doubles as the ack receipt for LREM.
                    return Ok(Delivery {
                        job,
                        receipt: payload,
                    });
                }
                Err(e) => {
                    // Poison message: drop it from the processing list so it
                    // cannot wedge the worker on restart.
                    tracing::error!(error = %e, "Dropping undecodable export job");
                    let _: Result<(), _> = conn.lrem(self.processing_key(), 1, &payload).await;
                }
            }
        }
    }

    async fn ack(&self, delivery: Delivery) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        conn.lrem::<_, _, ()>(self.processing_key(), 1, &delivery.receipt)
            .await
            .map_err(|e| QueueError::Backend(e.to_string()))?;

        tracing::debug!(job_id = %delivery.job.id, "Export job acknowledged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn get_test_queue() -> Option<RedisExportQueue> {
        let config = RedisQueueConfig {
            redis: RedisConfig {
                url: std::env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
                connect_timeout: Duration::from_secs(1),
            },
            queue_name: "test:export:playlists".to_string(),
            pop_timeout: 1,
        };

        RedisExportQueue::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_queue_round_trip() {
        let queue = match get_test_queue().await {
            Some(q) => q,
            None => return,
        };

        let job = ExportJob::new("playlist-redis", "user@example.com");
        queue.enqueue(job.clone()).await.unwrap();

        let delivery = queue.dequeue().await.unwrap();
        assert_eq!(delivery.job, job);

        queue.ack(delivery).await.unwrap();
        assert_eq!(queue.requeue_in_flight().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unacked_job_is_requeued() {
        let queue = match get_test_queue().await {
            Some(q) => q,
            None => return,
        };

        queue
            .enqueue(ExportJob::new("playlist-crash", "user@example.com"))
            .await
            .unwrap();

        // Dequeue without acking, as a crashed worker would.
        let delivery = queue.dequeue().await.unwrap();
        drop(delivery);

        assert_eq!(queue.requeue_in_flight().await.unwrap(), 1);
        let redelivered = queue.dequeue().await.unwrap();
        assert_eq!(redelivered.job.playlist_id, "playlist-crash");
        queue.ack(redelivered).await.unwrap();
    }
}
