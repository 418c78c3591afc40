//! In-memory export queue implementation.
//!
//! This is a fallback when Redis is not available. The queue is
//! process-local: jobs are lost on restart and are only visible to a worker
//! running in the same process.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use encore_core::domain::ExportJob;
use encore_core::ports::{Delivery, ExportQueue, QueueError};

/// In-memory export queue backed by a bounded channel.
pub struct InMemoryExportQueue {
    tx: mpsc::Sender<ExportJob>,
    rx: Mutex<mpsc::Receiver<ExportJob>>,
    pending: AtomicUsize,
}

impl InMemoryExportQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            tx,
            rx: Mutex::new(rx),
            pending: AtomicUsize::new(0),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryExportQueue {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[async_trait]
impl ExportQueue for InMemoryExportQueue {
    async fn enqueue(&self, job: ExportJob) -> Result<(), QueueError> {
        self.tx
            .send(job)
            .await
            .map_err(|e| QueueError::Enqueue(e.to_string()))?;
        self.pending.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn dequeue(&self) -> Result<Delivery, QueueError> {
        // One receiver guard at a time keeps a single in-flight job per call.
        let mut rx = self.rx.lock().await;
        let job = rx.recv().await.ok_or(QueueError::Closed)?;
        self.pending.fetch_sub(1, Ordering::Relaxed);
        let receipt = job.id.clone();
        Ok(Delivery { job, receipt })
    }

    async fn ack(&self, _delivery: Delivery) -> Result<(), QueueError> {
        // The channel pop is destructive, so there is nothing left to remove.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueue_dequeue_ack_round_trip() {
        let queue = InMemoryExportQueue::default();

        queue
            .enqueue(ExportJob::new("playlist-1", "user@example.com"))
            .await
            .unwrap();
        assert_eq!(queue.pending(), 1);

        let delivery = queue.dequeue().await.unwrap();
        assert_eq!(delivery.job.playlist_id, "playlist-1");
        assert_eq!(queue.pending(), 0);

        queue.ack(delivery).await.unwrap();
    }

    #[tokio::test]
    async fn dequeue_waits_for_a_producer() {
        let queue = std::sync::Arc::new(InMemoryExportQueue::default());

        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.dequeue().await.unwrap().job.playlist_id })
        };

        queue
            .enqueue(ExportJob::new("playlist-2", "user@example.com"))
            .await
            .unwrap();

        assert_eq!(consumer.await.unwrap(), "playlist-2");
    }
}
