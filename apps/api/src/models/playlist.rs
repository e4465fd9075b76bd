use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRow {
    pub id: Uuid,
    pub youtube_id: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideoRow {
    pub id: Uuid,
    pub playlist_id: Uuid,
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A saved playlist together with its videos, ordered by position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistGraph {
    #[serde(flatten)]
    pub playlist: PlaylistRow,
    pub videos: Vec<PlaylistVideoRow>,
}

/// One video as submitted by the client when saving a playlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoInput {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
}
