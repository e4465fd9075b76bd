use std::fmt::Write;

use tracing::warn;

use crate::api::PlaylistData;
use crate::storage::{LocalStorage, CURRENT_PLAYLIST};

pub const LOADING_MESSAGE: &str = "Loading playlist...";

/// Reads the stored playlist. Unreadable entries are logged and treated as absent.
pub fn load_current(storage: &LocalStorage) -> Option<PlaylistData> {
    storage
        .get::<PlaylistData>(CURRENT_PLAYLIST)
        .unwrap_or_else(|e| {
            warn!("Error parsing playlist data: {e}");
            None
        })
}

pub fn render_playlist(data: Option<&PlaylistData>) -> String {
    let Some(data) = data else {
        return format!("{LOADING_MESSAGE}\n");
    };

    let mut out = format!("Playlist Videos ({})\n\n", data.videos.len());
    for (index, video) in data.videos.iter().enumerate() {
        let _ = writeln!(out, "#{} {}", index + 1, video.title);
        let _ = writeln!(out, "    {}", video.url);
    }
    out
}
