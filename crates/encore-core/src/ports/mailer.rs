use async_trait::async_trait;

/// A single attachment on an outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
}

/// Email delivery port.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: &Attachment,
    ) -> Result<(), MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Mail rejected with status {status}")]
    Rejected { status: u16 },
}
