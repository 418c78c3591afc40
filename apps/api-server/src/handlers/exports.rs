//! Playlist export submission - the async boundary of the export pipeline.

use actix_web::{HttpResponse, web};

use encore_shared::ApiResponse;
use encore_shared::dto::ExportRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /export/playlists/{playlist_id}
///
/// Enqueues the job and returns: playlist existence is checked by the worker
/// when it processes the job, never on this path.
pub async fn post_export(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ExportRequest>,
) -> AppResult<HttpResponse> {
    let playlist_id = path.into_inner();

    let target_email = body.target_email.trim();
    if target_email.is_empty() || !target_email.contains('@') {
        return Err(AppError::BadRequest(
            "targetEmail must be a valid email address".to_string(),
        ));
    }

    state.exports.submit(&playlist_id, target_email).await?;

    Ok(HttpResponse::Created().json(ApiResponse::message("Your export request is being processed")))
}
