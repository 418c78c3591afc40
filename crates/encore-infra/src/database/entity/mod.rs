//! SeaORM entities for the catalog tables the core services touch.

pub mod album;
pub mod playlist;
pub mod playlist_song;
pub mod song;
pub mod user_album_like;
