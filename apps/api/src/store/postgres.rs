use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::playlist::{PlaylistGraph, PlaylistRow, PlaylistVideoRow, VideoInput};
use crate::models::user::{NewUser, UserRow};
use crate::store::{PlaylistStore, UserStore};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn videos_for(&self, playlist_id: Uuid) -> Result<Vec<PlaylistVideoRow>, AppError> {
        Ok(sqlx::query_as::<_, PlaylistVideoRow>(
            "SELECT * FROM playlist_videos WHERE playlist_id = $1 ORDER BY position ASC",
        )
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        Ok(
            sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_user(&self, user: NewUser) -> Result<Option<UserRow>, AppError> {
        let inserted = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, phone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => {
                info!("Created user {}", row.id);
                Ok(Some(row))
            }
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PlaylistStore for PgStore {
    async fn find_playlist(
        &self,
        youtube_id: &str,
        user_id: Uuid,
    ) -> Result<Option<PlaylistRow>, AppError> {
        Ok(sqlx::query_as::<_, PlaylistRow>(
            "SELECT * FROM playlists WHERE youtube_id = $1 AND user_id = $2 LIMIT 1",
        )
        .bind(youtube_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_playlist(
        &self,
        user_id: Uuid,
        youtube_id: &str,
        videos: &[VideoInput],
    ) -> Result<Option<PlaylistGraph>, AppError> {
        let mut tx = self.pool.begin().await?;

        // The unique constraint on (youtube_id, user_id) settles concurrent saves.
        let playlist: Option<PlaylistRow> = sqlx::query_as(
            r#"
            INSERT INTO playlists (youtube_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (youtube_id, user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(youtube_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(playlist) = playlist else {
            tx.rollback().await?;
            return Ok(None);
        };

        let video_ids: Vec<String> = videos.iter().map(|v| v.video_id.clone()).collect();
        let titles: Vec<String> = videos.iter().map(|v| v.title.clone()).collect();
        let thumbnails: Vec<String> = videos.iter().map(|v| v.thumbnail.clone()).collect();
        let positions: Vec<i32> = (0..videos.len() as i32).collect();

        let mut rows: Vec<PlaylistVideoRow> = sqlx::query_as(
            r#"
            INSERT INTO playlist_videos (playlist_id, video_id, title, thumbnail, position)
            SELECT $1::uuid, v.video_id, v.title, v.thumbnail, v.position
            FROM UNNEST($2::text[], $3::text[], $4::text[], $5::int4[])
                AS v(video_id, title, thumbnail, position)
            RETURNING *
            "#,
        )
        .bind(playlist.id)
        .bind(&video_ids)
        .bind(&titles)
        .bind(&thumbnails)
        .bind(&positions)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        rows.sort_by_key(|v| v.position);
        info!(
            "Saved playlist {} ({}) with {} videos for user {user_id}",
            playlist.id,
            playlist.youtube_id,
            rows.len()
        );

        Ok(Some(PlaylistGraph {
            playlist,
            videos: rows,
        }))
    }

    async fn get_playlist(&self, id: Uuid) -> Result<Option<PlaylistGraph>, AppError> {
        let playlist = sqlx::query_as::<_, PlaylistRow>("SELECT * FROM playlists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match playlist {
            Some(playlist) => {
                let videos = self.videos_for(playlist.id).await?;
                Ok(Some(PlaylistGraph { playlist, videos }))
            }
            None => Ok(None),
        }
    }

    async fn list_playlists(&self, user_id: Uuid) -> Result<Vec<PlaylistGraph>, AppError> {
        let playlists = sqlx::query_as::<_, PlaylistRow>(
            "SELECT * FROM playlists WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut graphs = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            let videos = self.videos_for(playlist.id).await?;
            graphs.push(PlaylistGraph { playlist, videos });
        }
        Ok(graphs)
    }
}
