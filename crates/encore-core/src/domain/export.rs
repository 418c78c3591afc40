use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Export job - the immutable value serialized onto the queue.
///
/// Carries no identity beyond the generated `id`, which is used only for
/// log correlation and as the in-memory delivery receipt. Re-processing a
/// duplicate job re-sends an email; that is accepted at-least-once behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportJob {
    pub id: String,
    pub playlist_id: String,
    pub target_email: String,
    pub enqueued_at: DateTime<Utc>,
}

impl ExportJob {
    pub fn new(playlist_id: impl Into<String>, target_email: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            playlist_id: playlist_id.into(),
            target_email: target_email.into(),
            enqueued_at: Utc::now(),
        }
    }
}
