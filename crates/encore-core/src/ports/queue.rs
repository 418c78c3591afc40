//! Export queue port - abstraction over the durable job broker.

use async_trait::async_trait;

use crate::domain::ExportJob;

/// A dequeued job plus the receipt needed to acknowledge it.
#[derive(Debug)]
pub struct Delivery {
    pub job: ExportJob,
    /// Backend-specific acknowledgment handle (raw payload for Redis,
    /// job id for the in-memory queue).
    pub receipt: String,
}

/// Export queue trait - at-least-once FIFO delivery.
///
/// A job is never lost once `enqueue` returns, but it may be redelivered if
/// a consumer crashes between `dequeue` and `ack`.
#[async_trait]
pub trait ExportQueue: Send + Sync {
    /// Durably enqueue a job. Returns as soon as the broker has it.
    async fn enqueue(&self, job: ExportJob) -> Result<(), QueueError>;

    /// Wait for the next job. Each delivery goes to exactly one consumer.
    async fn dequeue(&self) -> Result<Delivery, QueueError>;

    /// Acknowledge a delivery, removing it from the broker.
    async fn ack(&self, delivery: Delivery) -> Result<(), QueueError>;
}

/// Queue errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Failed to enqueue job: {0}")]
    Enqueue(String),

    #[error("Broker error: {0}")]
    Backend(String),

    #[error("Queue is closed")]
    Closed,
}
