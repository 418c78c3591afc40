//! Album cover upload - bounded streaming ingestion.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};

use encore_infra::storage::UploadMeta;
use encore_shared::ApiResponse;
use encore_shared::dto::CoverData;

use crate::config::ALLOWED_COVER_TYPES;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /albums/{album_id}/covers
///
/// The content-type allow-list is enforced here from transport headers; the
/// storage guard below is type-agnostic and only polices size, byte by byte
/// as the stream arrives.
pub async fn post_album_cover(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let album_id = path.into_inner();

    if !state.catalog.album_exists(&album_id).await? {
        return Err(AppError::NotFound(format!("album {album_id} not found")));
    }

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !ALLOWED_COVER_TYPES.contains(&content_type) {
        return Err(AppError::UnsupportedMediaType);
    }

    let meta = UploadMeta {
        filename_hint: req
            .headers()
            .get("X-Filename")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        declared_len: req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok()),
    };

    let filename = state.storage.write_stream(payload, &meta).await?;
    let cover_url = format!(
        "{}/uploads/images/{}",
        state.config.public_base_url, filename
    );

    // The album can disappear while the stream is in flight; drop the
    // written file so the sink directory does not accumulate orphans.
    if !state.catalog.update_album_cover(&album_id, &cover_url).await? {
        if let Err(err) = state.storage.remove(&filename).await {
            tracing::warn!(%filename, error = %err, "failed to remove orphaned cover");
        }
        return Err(AppError::NotFound(format!("album {album_id} not found")));
    }

    tracing::info!(%album_id, %filename, "album cover uploaded");

    Ok(HttpResponse::Created()
        .json(ApiResponse::success_message(CoverData { cover_url }, "Cover uploaded")))
}
