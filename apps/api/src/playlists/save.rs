use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::playlist::{PlaylistGraph, VideoInput};
use crate::store::PlaylistStore;

#[derive(Debug)]
pub enum SaveOutcome {
    Created(PlaylistGraph),
    /// The user already saved this playlist; carries the existing row's id.
    Exists(Uuid),
}

/// Saves a playlist and its videos for a user unless the user already has it.
///
/// The existence check runs first; a concurrent save that slips past it is
/// caught by the store's insert and reported the same way.
pub async fn save_playlist(
    store: &dyn PlaylistStore,
    user_id: Uuid,
    youtube_id: &str,
    videos: &[VideoInput],
) -> Result<SaveOutcome, AppError> {
    if let Some(existing) = store.find_playlist(youtube_id, user_id).await? {
        return Ok(SaveOutcome::Exists(existing.id));
    }

    match store.insert_playlist(user_id, youtube_id, videos).await? {
        Some(graph) => Ok(SaveOutcome::Created(graph)),
        None => {
            info!("Lost insert race for playlist {youtube_id} (user {user_id})");
            let existing = store
                .find_playlist(youtube_id, user_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("playlist {youtube_id} vanished after conflict"))?;
            Ok(SaveOutcome::Exists(existing.id))
        }
    }
}
