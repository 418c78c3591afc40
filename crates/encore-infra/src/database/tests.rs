#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    use encore_core::ports::CatalogStore;

    use crate::database::PostgresCatalog;
    use crate::database::entity::{album, playlist, playlist_song, song};

    fn album_row(id: &str) -> album::Model {
        album::Model {
            id: id.to_owned(),
            name: "Viva la Vida".to_owned(),
            year: 2008,
            cover: None,
        }
    }

    #[tokio::test]
    async fn test_album_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![album_row("album-1")], vec![]])
            .into_connection();

        let repo = PostgresCatalog::new(db);

        assert!(repo.album_exists("album-1").await.unwrap());
        assert!(!repo.album_exists("album-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_count_album_likes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(3)),
            )])]])
            .into_connection();

        let repo = PostgresCatalog::new(db);

        assert_eq!(repo.count_album_likes("album-1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_album_like_reports_whether_an_edge_existed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresCatalog::new(db);

        assert!(repo.delete_album_like("album-1", "user-1").await.unwrap());
        assert!(!repo.delete_album_like("album-1", "user-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_album_cover_misses_deleted_album() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresCatalog::new(db);

        assert!(
            !repo
                .update_album_cover("album-gone", "http://x/cover.png")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_playlist_with_songs_preserves_playlist_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![playlist::Model {
                id: "playlist-123".to_owned(),
                name: "Road Trip".to_owned(),
            }]])
            .append_query_results(vec![vec![
                playlist_song::Model {
                    id: "ps-1".to_owned(),
                    playlist_id: "playlist-123".to_owned(),
                    song_id: "song-2".to_owned(),
                },
                playlist_song::Model {
                    id: "ps-2".to_owned(),
                    playlist_id: "playlist-123".to_owned(),
                    song_id: "song-1".to_owned(),
                },
            ]])
            .append_query_results(vec![vec![
                song::Model {
                    id: "song-1".to_owned(),
                    title: "Morning".to_owned(),
                    performer: "The Larks".to_owned(),
                    album_id: None,
                },
                song::Model {
                    id: "song-2".to_owned(),
                    title: "Evening".to_owned(),
                    performer: "The Owls".to_owned(),
                    album_id: None,
                },
            ]])
            .into_connection();

        let repo = PostgresCatalog::new(db);

        let playlist = repo
            .playlist_with_songs("playlist-123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(playlist.name, "Road Trip");
        let ids: Vec<&str> = playlist.songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["song-2", "song-1"]);
    }

    #[tokio::test]
    async fn test_missing_playlist_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<playlist::Model>::new()])
            .into_connection();

        let repo = PostgresCatalog::new(db);

        assert!(
            repo.playlist_with_songs("playlist-x")
                .await
                .unwrap()
                .is_none()
        );
    }
}
