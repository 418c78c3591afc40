//! Standard API response envelope.
//!
//! Every endpoint answers `{"status": "...", "message"?, "data"?}` with
//! status `success` for 2xx, `fail` for client errors, and `error` for
//! server faults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
        }
    }

    pub fn success_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_empty_fields() {
        let json = serde_json::to_string(&ApiResponse::success(serde_json::json!({"likes": 3})))
            .unwrap();
        assert_eq!(json, r#"{"status":"success","data":{"likes":3}}"#);
    }

    #[test]
    fn fail_envelope_carries_the_message() {
        let json = serde_json::to_string(&ApiResponse::fail("album already liked")).unwrap();
        assert_eq!(json, r#"{"status":"fail","message":"album already liked"}"#);
    }
}
