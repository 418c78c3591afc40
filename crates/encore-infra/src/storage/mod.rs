//! Bounded streaming upload guard over a local filesystem sink.
//!
//! Consumes a push-based chunk stream and enforces a hard byte ceiling while
//! the stream is still arriving. The declared content-length header is only a
//! fast-fail hint; the running byte counter is the authoritative check, since
//! a client can lie about (or omit) the declared length.

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Default upload byte ceiling.
pub const DEFAULT_MAX_BYTES: u64 = 512_000;

/// File storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Destination directory for finished uploads.
    pub dir: PathBuf,
    /// Hard ceiling on accepted payload bytes.
    pub max_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads/images"),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.dir),
            max_bytes: std::env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_BYTES),
        }
    }
}

/// Transport metadata supplied before the stream is consumed.
#[derive(Debug, Default)]
pub struct UploadMeta {
    /// Original filename hint from the client.
    pub filename_hint: Option<String>,
    /// Declared content length, untrusted.
    pub declared_len: Option<u64>,
}

/// Upload failures. Oversize rejection is distinguishable from transport
/// faults so the HTTP layer can answer 413 versus 500.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("payload exceeds maximum allowed size of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("upload source failed: {0}")]
    Source(String),

    #[error("upload sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

/// Filesystem-backed upload sink with a streaming size guard.
///
/// Safe to share across concurrent uploads: each call owns its session state,
/// and generated names combine a timestamp with a random component so
/// concurrent writes into the shared directory cannot collide.
pub struct FileStorage {
    dir: PathBuf,
    max_bytes: u64,
}

impl FileStorage {
    /// Create the storage, making the destination directory if needed.
    pub async fn new(config: StorageConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.dir).await?;
        tracing::info!(dir = %config.dir.display(), max_bytes = config.max_bytes, "upload storage ready");
        Ok(Self {
            dir: config.dir,
            max_bytes: config.max_bytes,
        })
    }

    /// Stream an upload to disk, returning the generated filename.
    ///
    /// The ceiling is checked before each chunk reaches the sink; the moment
    /// the running counter exceeds it, the source stops being consumed and
    /// the partial file is deleted. Any source or sink fault likewise cleans
    /// up the partial artifact before propagating.
    pub async fn write_stream<S, E>(
        &self,
        stream: S,
        meta: &UploadMeta,
    ) -> Result<String, UploadError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: fmt::Display,
    {
        // Untrusted fast-fail: a client that declares an oversize payload is
        // rejected before any bytes are read.
        if let Some(declared) = meta.declared_len {
            if declared > self.max_bytes {
                return Err(UploadError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let filename = self.generate_name(meta.filename_hint.as_deref());
        let path = self.dir.join(&filename);
        let file = fs::File::create(&path).await?;

        match self.copy_capped(stream, file).await {
            Ok(written) => {
                tracing::debug!(filename = %filename, written, "upload complete");
                Ok(filename)
            }
            Err(err) => {
                if let Err(cleanup) = fs::remove_file(&path).await {
                    tracing::warn!(path = %path.display(), error = %cleanup, "failed to remove partial upload");
                }
                Err(err)
            }
        }
    }

    async fn copy_capped<S, E>(&self, mut stream: S, mut file: fs::File) -> Result<u64, UploadError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: fmt::Display,
    {
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| UploadError::Source(e.to_string()))?;

            written += chunk.len() as u64;
            if written > self.max_bytes {
                return Err(UploadError::TooLarge {
                    limit: self.max_bytes,
                });
            }

            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }

    /// Remove a previously stored file. For callers whose follow-up write
    /// failed and would otherwise orphan the artifact.
    pub async fn remove(&self, filename: &str) -> std::io::Result<()> {
        fs::remove_file(self.dir.join(filename)).await
    }

    /// `{unix_millis}-{random}-{hint}`, collision-safe under concurrency.
    fn generate_name(&self, hint: Option<&str>) -> String {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let random = uuid::Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}",
            timestamp,
            &random[..8],
            sanitize_hint(hint.unwrap_or("upload"))
        )
    }
}

/// Strip path separators and anything else unsafe from the client hint.
fn sanitize_hint(hint: &str) -> String {
    let cleaned: String = hint
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
