//! HTTP handlers and route configuration.

mod covers;
mod exports;
mod health;
mod likes;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route(
            "/albums/{album_id}/likes",
            web::get().to(likes::get_album_likes),
        )
        .route(
            "/albums/{album_id}/likes",
            web::post().to(likes::post_album_like),
        )
        .route(
            "/albums/{album_id}/likes",
            web::delete().to(likes::delete_album_like),
        )
        .route(
            "/albums/{album_id}/covers",
            web::post().to(covers::post_album_cover),
        )
        .route(
            "/export/playlists/{playlist_id}",
            web::post().to(exports::post_export),
        );
}
