//! Error handling - maps core errors onto the API envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use encore_shared::ApiResponse;
use std::fmt;

use encore_core::error::DomainError;
use encore_core::ports::QueueError;
use encore_infra::storage::UploadError;

/// Application-level error type behind every handler.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    PayloadTooLarge(u64),
    UnsupportedMediaType,
    ServiceUnavailable(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::PayloadTooLarge(limit) => {
                write!(f, "Payload content length greater than maximum allowed: {}", limit)
            }
            AppError::UnsupportedMediaType => write!(f, "Cover must be an image"),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ApiResponse::error("Internal server error".to_string())
            }
            AppError::ServiceUnavailable(detail) => {
                tracing::error!("Service unavailable: {}", detail);
                ApiResponse::error(self.to_string())
            }
            _ => ApiResponse::fail(self.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} {} not found", entity, id))
            }
            // Duplicate likes and missing unlike targets answer 400,
            // not 409, to keep the public contract stable.
            DomainError::Conflict(msg) => AppError::BadRequest(msg),
            DomainError::InvariantViolation(msg) => AppError::BadRequest(msg),
            DomainError::Repo(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<encore_core::error::RepoError> for AppError {
    fn from(err: encore_core::error::RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<QueueError> for AppError {
    fn from(err: QueueError) -> Self {
        AppError::ServiceUnavailable(err.to_string())
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { limit } => AppError::PayloadTooLarge(limit),
            UploadError::Source(msg) => AppError::Internal(format!("upload source: {msg}")),
            UploadError::Sink(e) => AppError::Internal(format!("upload sink: {e}")),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_expected_status_codes() {
        let conflict: AppError = DomainError::Conflict("album already liked".into()).into();
        assert_eq!(conflict.status_code(), StatusCode::BAD_REQUEST);

        let missing: AppError = DomainError::NotFound {
            entity: "album",
            id: "album-1".into(),
        }
        .into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn oversize_uploads_answer_413() {
        let err: AppError = UploadError::TooLarge { limit: 512_000 }.into();
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(err.to_string().contains("512000"));
    }
}
