//! Playlist export pipeline - producer and consumer around the durable queue.
//!
//! The producer enqueues and returns; the client-visible latency is the
//! enqueue round-trip, never email delivery. The worker dequeues one job at
//! a time, rehydrates the playlist, and mails the serialized artifact.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{ExportJob, Playlist};
use crate::error::RepoError;
use crate::ports::{Attachment, CatalogStore, ExportQueue, MailError, Mailer, QueueError};

const EXPORT_SUBJECT: &str = "Playlist Export";
const EXPORT_BODY: &str = "Attached is the exported song list from your playlist.";
const EXPORT_ATTACHMENT_NAME: &str = "playlist.json";

/// Failures inside a single job. These never reach the submitting client;
/// the worker logs them and acknowledges the job anyway.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("playlist not found: {0}")]
    PlaylistMissing(String),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("artifact serialization failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Enqueues export jobs. Deliberately does not check playlist existence -
/// the submit path stays cheap and non-blocking, and the worker verifies
/// existence when it processes the job.
pub struct ExportProducer {
    queue: Arc<dyn ExportQueue>,
}

impl ExportProducer {
    pub fn new(queue: Arc<dyn ExportQueue>) -> Self {
        Self { queue }
    }

    pub async fn submit(&self, playlist_id: &str, target_email: &str) -> Result<(), QueueError> {
        let job = ExportJob::new(playlist_id, target_email);
        self.queue.enqueue(job).await?;
        tracing::info!(playlist_id, "export job enqueued");
        Ok(())
    }
}

/// Long-running export consumer. One in-flight job per worker instance;
/// parallelism comes from running more instances.
pub struct ExportWorker {
    queue: Arc<dyn ExportQueue>,
    store: Arc<dyn CatalogStore>,
    mailer: Arc<dyn Mailer>,
}

impl ExportWorker {
    pub fn new(
        queue: Arc<dyn ExportQueue>,
        store: Arc<dyn CatalogStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            queue,
            store,
            mailer,
        }
    }

    /// Consume jobs until the queue fails or closes.
    pub async fn run(&self) -> Result<(), QueueError> {
        loop {
            self.run_once().await?;
        }
    }

    /// Dequeue and process exactly one job.
    ///
    /// The job is acknowledged whether or not processing succeeded: failures
    /// are logged and the export is dropped, with no retry and no
    /// dead-letter. A worker crash before the ack leaves the job on the
    /// broker for redelivery, which may duplicate the email.
    pub async fn run_once(&self) -> Result<(), QueueError> {
        let delivery = self.queue.dequeue().await?;
        let job = &delivery.job;

        match self.process(job).await {
            Ok(()) => {
                tracing::info!(
                    job_id = %job.id,
                    playlist_id = %job.playlist_id,
                    target = %mask_email(&job.target_email),
                    "export emailed"
                );
            }
            Err(err) => {
                tracing::error!(
                    job_id = %job.id,
                    playlist_id = %job.playlist_id,
                    error = %err,
                    "export failed, dropping job"
                );
            }
        }

        self.queue.ack(delivery).await
    }

    async fn process(&self, job: &ExportJob) -> Result<(), ExportError> {
        let playlist = self
            .store
            .playlist_with_songs(&job.playlist_id)
            .await?
            .ok_or_else(|| ExportError::PlaylistMissing(job.playlist_id.clone()))?;

        let attachment = Attachment {
            filename: EXPORT_ATTACHMENT_NAME.to_string(),
            content: render_artifact(&playlist)?,
        };

        self.mailer
            .send(&job.target_email, EXPORT_SUBJECT, EXPORT_BODY, &attachment)
            .await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExportArtifact<'a> {
    playlist: &'a Playlist,
}

/// Serialize the export artifact. Struct field order fixes the byte layout,
/// so the same playlist state always renders the same bytes.
pub fn render_artifact(playlist: &Playlist) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ExportArtifact { playlist })
}

/// Mask the local part of an address to keep PII out of logs. Works on
/// characters, not bytes, so a multi-byte first character never splits.
fn mask_email(email: &str) -> String {
    let Some(at) = email.find('@') else {
        return "***".to_string();
    };
    let local = &email[..at];
    match local.chars().next() {
        Some(first) if local.chars().count() > 1 => format!("{first}***{}", &email[at..]),
        _ => format!("***{}", &email[at..]),
    }
}
