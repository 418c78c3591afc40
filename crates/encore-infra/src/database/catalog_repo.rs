//! PostgreSQL catalog store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

use encore_core::domain::{Playlist, Song};
use encore_core::error::RepoError;
use encore_core::ports::CatalogStore;

use super::entity::{album, playlist, playlist_song, song, user_album_like};

/// SeaORM-backed catalog store over the shared connection handle.
pub struct PostgresCatalog {
    db: DbConn,
}

impl PostgresCatalog {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(e: sea_orm::DbErr) -> RepoError {
    let msg = e.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint(msg)
    } else {
        RepoError::Query(msg)
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalog {
    async fn album_exists(&self, album_id: &str) -> Result<bool, RepoError> {
        let found = album::Entity::find_by_id(album_id.to_owned())
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(found.is_some())
    }

    async fn count_album_likes(&self, album_id: &str) -> Result<u64, RepoError> {
        user_album_like::Entity::find()
            .filter(user_album_like::Column::AlbumId.eq(album_id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn has_album_like(&self, album_id: &str, user_id: &str) -> Result<bool, RepoError> {
        let found = user_album_like::Entity::find()
            .filter(user_album_like::Column::AlbumId.eq(album_id))
            .filter(user_album_like::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(found.is_some())
    }

    async fn insert_album_like(&self, album_id: &str, user_id: &str) -> Result<(), RepoError> {
        let edge = user_album_like::ActiveModel {
            id: Set(format!("like-{}", uuid::Uuid::new_v4())),
            user_id: Set(user_id.to_owned()),
            album_id: Set(album_id.to_owned()),
        };

        // A racing duplicate surfaces here as a unique-index violation, which
        // query_err maps to RepoError::Constraint.
        edge.insert(&self.db).await.map_err(query_err)?;
        Ok(())
    }

    async fn delete_album_like(&self, album_id: &str, user_id: &str) -> Result<bool, RepoError> {
        let result = user_album_like::Entity::delete_many()
            .filter(user_album_like::Column::AlbumId.eq(album_id))
            .filter(user_album_like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn playlist_with_songs(&self, playlist_id: &str) -> Result<Option<Playlist>, RepoError> {
        let Some(row) = playlist::Entity::find_by_id(playlist_id.to_owned())
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let links = playlist_song::Entity::find()
            .filter(playlist_song::Column::PlaylistId.eq(playlist_id))
            .order_by_asc(playlist_song::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let song_ids: Vec<String> = links.into_iter().map(|l| l.song_id).collect();
        let songs = if song_ids.is_empty() {
            Vec::new()
        } else {
            let mut by_id: HashMap<String, Song> = song::Entity::find()
                .filter(song::Column::Id.is_in(song_ids.clone()))
                .all(&self.db)
                .await
                .map_err(query_err)?
                .into_iter()
                .map(|s| (s.id.clone(), s.into()))
                .collect();

            // Preserve playlist insertion order, not the fetch order.
            song_ids.iter().filter_map(|id| by_id.remove(id)).collect()
        };

        Ok(Some(Playlist {
            id: row.id,
            name: row.name,
            songs,
        }))
    }

    async fn update_album_cover(&self, album_id: &str, cover_url: &str) -> Result<bool, RepoError> {
        let result = album::Entity::update_many()
            .col_expr(album::Column::Cover, Expr::value(cover_url))
            .filter(album::Column::Id.eq(album_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.rows_affected > 0)
    }
}
