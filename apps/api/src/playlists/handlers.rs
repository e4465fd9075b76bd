//! Axum route handlers for playlist listing and saved learning paths.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::playlist::{PlaylistGraph, VideoInput};
use crate::playlists::save::{save_playlist, SaveOutcome};
use crate::state::AppState;
use crate::youtube::VideoLink;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideosQuery {
    pub playlist_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistVideosResponse {
    pub videos: Vec<VideoLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlaylistRequest {
    pub playlist_id: Option<String>,
    pub videos: Option<Vec<serde_json::Value>>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SavePlaylistResponse {
    pub success: bool,
    pub playlist: PlaylistGraph,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlaylistsQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistListResponse {
    pub playlists: Vec<PlaylistGraph>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistDetailResponse {
    pub playlist: PlaylistGraph,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/getPlaylistVideos?playlistId=…
///
/// One call to the external source; nothing is persisted.
pub async fn handle_get_playlist_videos(
    State(state): State<AppState>,
    Query(query): Query<PlaylistVideosQuery>,
) -> Result<Json<PlaylistVideosResponse>, AppError> {
    let playlist_id = query
        .playlist_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Invalid playlist ID".to_string()))?;

    let videos = state
        .source
        .list_videos(&playlist_id)
        .await
        .map_err(|e| {
            error!("Error fetching video links for {playlist_id}: {e}");
            AppError::Upstream(e.to_string())
        })?;

    Ok(Json(PlaylistVideosResponse { videos }))
}

/// POST /api/playlists
///
/// Saves a fetched playlist as a learning path for the authenticated user.
pub async fn handle_save_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<SavePlaylistRequest>, JsonRejection>,
) -> Result<Json<SavePlaylistResponse>, AppError> {
    let Json(req) = body.map_err(|_| AppError::Validation("Invalid request body".to_string()))?;

    let (Some(playlist_id), Some(raw_videos), Some(user_id)) = (
        req.playlist_id.filter(|s| !s.trim().is_empty()),
        req.videos,
        req.user_id,
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    if user_id != auth.user_id {
        return Err(AppError::Unauthorized);
    }

    let videos = raw_videos
        .into_iter()
        .map(serde_json::from_value::<VideoInput>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| AppError::Validation("Invalid video data format".to_string()))?;

    match save_playlist(state.playlists.as_ref(), user_id, &playlist_id, &videos).await? {
        SaveOutcome::Created(playlist) => {
            info!(
                "User {user_id} saved playlist {playlist_id} ({} videos)",
                playlist.videos.len()
            );
            Ok(Json(SavePlaylistResponse {
                success: true,
                playlist,
            }))
        }
        SaveOutcome::Exists(existing) => Err(AppError::Conflict {
            message: "Playlist already exists for this user".to_string(),
            playlist_id: Some(existing),
        }),
    }
}

/// GET /api/playlists?userId=…
pub async fn handle_list_playlists(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListPlaylistsQuery>,
) -> Result<Json<PlaylistListResponse>, AppError> {
    let user_id = query.user_id.unwrap_or(auth.user_id);
    if user_id != auth.user_id {
        return Err(AppError::Unauthorized);
    }
    let playlists = state.playlists.list_playlists(user_id).await?;
    Ok(Json(PlaylistListResponse { playlists }))
}

/// GET /api/playlists/:id
pub async fn handle_get_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PlaylistDetailResponse>, AppError> {
    let playlist = state
        .playlists
        .get_playlist(id)
        .await?
        .filter(|g| g.playlist.user_id == auth.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Playlist {id} not found")))?;
    Ok(Json(PlaylistDetailResponse { playlist }))
}
