//! HTTP mail-relay mailer.
//!
//! Posts outbound mail as JSON to a relay endpoint. No retry lives here:
//! the export worker logs delivery failures and drops the job.

use async_trait::async_trait;
use std::time::Duration;

use encore_core::ports::{Attachment, MailError, Mailer};

/// Mail relay configuration.
#[derive(Debug, Clone)]
pub struct MailRelayConfig {
    /// Relay endpoint accepting JSON mail submissions.
    pub url: String,
    /// From address stamped on every message.
    pub from: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for MailRelayConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8025/api/send".to_string(),
            from: "Encore API <no-reply@encore.local>".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl MailRelayConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            url: std::env::var("MAIL_RELAY_URL").unwrap_or(default.url),
            from: std::env::var("MAIL_FROM").unwrap_or(default.from),
            timeout: Duration::from_secs(
                std::env::var("MAIL_RELAY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// Mailer that submits messages to the configured HTTP relay.
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailRelayConfig,
}

impl HttpMailer {
    pub fn new(config: MailRelayConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Unreachable(format!("http client setup: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, MailError> {
        Self::new(MailRelayConfig::from_env())
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: &Attachment,
    ) -> Result<(), MailError> {
        let payload = serde_json::json!({
            "from": self.config.from,
            "to": to,
            "subject": subject,
            "text": body,
            "attachments": [{
                "filename": attachment.filename,
                "content": attachment.content,
            }],
        });

        let response = self
            .client
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_builds_client_or_reports_the_failure() {
        // A default config must produce a working client; a builder failure
        // surfaces as an error instead of a silently degraded client.
        let mailer = HttpMailer::new(MailRelayConfig::default());
        assert!(mailer.is_ok());
    }
}
