//! YouTube Data API client, the single place that talks to the playlistItems endpoint.
//!
//! One request per listing: at most `MAX_RESULTS` items come back and later pages
//! are never requested.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const MAX_RESULTS: u32 = 50;
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A playlist entry flattened into the shape the client renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoLink {
    pub id: String,
    pub url: String,
    pub title: String,
    pub thumbnail: String,
    pub position: u32,
}

/// Lists the videos of an external playlist.
///
/// Carried in `AppState` as `Arc<dyn PlaylistSource>`.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn list_videos(&self, playlist_id: &str) -> Result<Vec<VideoLink>, SourceError>;
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub resource_id: ResourceId,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, SourceError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlaylistSource for YouTubeClient {
    async fn list_videos(&self, playlist_id: &str) -> Result<Vec<VideoLink>, SourceError> {
        let max_results = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(format!("{}/playlistItems", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: PlaylistItemsResponse = serde_json::from_str(&body)?;
        debug!(
            "Fetched {} items for playlist {playlist_id}",
            parsed.items.len()
        );

        Ok(map_items(parsed.items))
    }
}

/// Maps API items to `VideoLink`s, keeping the API's order as `position`.
pub fn map_items(items: Vec<PlaylistItem>) -> Vec<VideoLink> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let Snippet {
                title,
                resource_id,
                thumbnails,
            } = item.snippet;
            VideoLink {
                url: format!("{WATCH_URL}{}", resource_id.video_id),
                id: resource_id.video_id,
                title,
                thumbnail: thumbnails.medium.map(|t| t.url).unwrap_or_default(),
                position: i as u32,
            }
        })
        .collect()
}
