//! Album like endpoints - the cache-aside counter surface.

use actix_web::{HttpRequest, HttpResponse, web};

use encore_core::services::CountSource;
use encore_shared::ApiResponse;
use encore_shared::dto::LikesData;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// The authenticated user id, supplied by the auth layer in front of this
/// service.
fn user_id(req: &HttpRequest) -> AppResult<String> {
    req.headers()
        .get("X-User-Id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("X-User-Id header is required".to_string()))
}

/// GET /albums/{album_id}/likes
///
/// Answers from the cache when possible, marked by `X-Data-Source: cache`.
pub async fn get_album_likes(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let album_id = path.into_inner();
    let (likes, source) = state.likes.count(&album_id).await?;

    Ok(likes_response(likes, source))
}

/// Cache hits carry `X-Data-Source: cache`; store reads carry no marker.
fn likes_response(likes: u64, source: CountSource) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if source == CountSource::Cache {
        builder.insert_header(("X-Data-Source", "cache"));
    }

    builder.json(ApiResponse::success(LikesData { likes }))
}

/// POST /albums/{album_id}/likes
pub async fn post_album_like(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let album_id = path.into_inner();
    let user_id = user_id(&req)?;

    state.likes.like(&album_id, &user_id).await?;

    Ok(HttpResponse::Created().json(ApiResponse::message("Album liked")))
}

/// DELETE /albums/{album_id}/likes
pub async fn delete_album_like(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let album_id = path.into_inner();
    let user_id = user_id(&req)?;

    state.likes.unlike(&album_id, &user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Album like removed")))
}
