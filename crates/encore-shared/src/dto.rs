//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to export a playlist to an email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "targetEmail")]
    pub target_email: String,
}

/// Like count for an album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesData {
    pub likes: u64,
}

/// Public URL of an uploaded album cover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverData {
    #[serde(rename = "coverUrl")]
    pub cover_url: String,
}
