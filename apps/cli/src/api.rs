//! HTTP client for the Learnpath API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub url: String,
    pub title: String,
    pub thumbnail: String,
}

/// What the display view reads back: the playlist id plus its videos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistData {
    pub id: String,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVideo {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlaylistRequest {
    pub playlist_id: String,
    pub user_id: Uuid,
    pub videos: Vec<SaveVideo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlaylist {
    pub id: Uuid,
    pub youtube_id: String,
    pub videos: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    playlist: SavedPlaylist,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
pub trait LearnpathApi: Send + Sync {
    async fn playlist_videos(&self, playlist_id: &str) -> Result<Vec<Video>>;
    async fn sign_up(&self, request: &SignUpRequest) -> Result<Session>;
    async fn sign_in(&self, request: &SignInRequest) -> Result<Session>;
    async fn save_playlist(&self, token: &str, request: &SavePlaylistRequest)
        -> Result<SavedPlaylist>;
}

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turns a non-2xx response into `CliError::Api`, using the server's message when present.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("Request failed with status {status}"));
    Err(CliError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl LearnpathApi for HttpApi {
    async fn playlist_videos(&self, playlist_id: &str) -> Result<Vec<Video>> {
        let response = self
            .client
            .get(self.url("/api/getPlaylistVideos"))
            .query(&[("playlistId", playlist_id)])
            .send()
            .await?;
        let parsed: VideosResponse = check(response).await?.json().await?;
        debug!("Received {} videos for {playlist_id}", parsed.videos.len());
        Ok(parsed.videos)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Session> {
        let response = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<Session> {
        let response = self
            .client
            .post(self.url("/api/auth/signin"))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn save_playlist(
        &self,
        token: &str,
        request: &SavePlaylistRequest,
    ) -> Result<SavedPlaylist> {
        let response = self
            .client
            .post(self.url("/api/playlists"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let parsed: SaveResponse = check(response).await?.json().await?;
        Ok(parsed.playlist)
    }
}
