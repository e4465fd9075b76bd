//! The submit-a-URL flow and the account/save actions that go with it.

use tracing::warn;

use crate::api::{
    LearnpathApi, PlaylistData, SaveVideo, SavePlaylistRequest, SavedPlaylist, Session,
    SignInRequest, SignUpRequest,
};
use crate::error::{CliError, Result};
use crate::extract::extract_playlist_id;
use crate::storage::{LocalStorage, AUTH_STORAGE, CURRENT_PLAYLIST};

/// Extracts the playlist id, fetches its videos and stores the result for the
/// display view. An unrecognized URL fails before any request is made; a
/// failed fetch leaves the stored playlist untouched.
pub async fn load_playlist(
    api: &dyn LearnpathApi,
    storage: &LocalStorage,
    url: &str,
) -> Result<PlaylistData> {
    let id = extract_playlist_id(url).ok_or(CliError::InvalidUrl)?;

    let videos = api.playlist_videos(&id).await.map_err(|e| {
        warn!("Fetching playlist {id} failed: {e}");
        CliError::FetchFailed
    })?;

    let data = PlaylistData { id, videos };
    storage.set(CURRENT_PLAYLIST, &data)?;
    Ok(data)
}

/// Saves the stored playlist as a learning path for the signed-in user.
pub async fn save_current(api: &dyn LearnpathApi, storage: &LocalStorage) -> Result<SavedPlaylist> {
    let session: Session = storage.get(AUTH_STORAGE)?.ok_or(CliError::NotSignedIn)?;
    let playlist: PlaylistData = storage.get(CURRENT_PLAYLIST)?.ok_or(CliError::NoPlaylist)?;

    let request = SavePlaylistRequest {
        playlist_id: playlist.id,
        user_id: session.user.id,
        videos: playlist
            .videos
            .into_iter()
            .map(|v| SaveVideo {
                video_id: v.id,
                title: v.title,
                thumbnail: v.thumbnail,
            })
            .collect(),
    };

    api.save_playlist(&session.token, &request).await
}

pub async fn sign_up(
    api: &dyn LearnpathApi,
    storage: &LocalStorage,
    request: &SignUpRequest,
) -> Result<Session> {
    let session = api.sign_up(request).await?;
    storage.set(AUTH_STORAGE, &session)?;
    Ok(session)
}

pub async fn sign_in(
    api: &dyn LearnpathApi,
    storage: &LocalStorage,
    request: &SignInRequest,
) -> Result<Session> {
    let session = api.sign_in(request).await?;
    storage.set(AUTH_STORAGE, &session)?;
    Ok(session)
}

pub fn sign_out(storage: &LocalStorage) -> Result<()> {
    storage.remove(AUTH_STORAGE)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::api::{SessionUser, Video};

    #[derive(Default)]
    struct FakeApi {
        fail_fetch: bool,
        fetch_calls: AtomicUsize,
        saved: Mutex<Vec<(String, String, usize)>>,
    }

    fn video(i: usize) -> Video {
        Video {
            id: format!("v{i}"),
            url: format!("https://www.youtube.com/watch?v=v{i}"),
            title: format!("Video {i}"),
            thumbnail: format!("https://img/{i}.jpg"),
        }
    }

    fn session() -> Session {
        Session {
            user: SessionUser {
                id: Uuid::new_v4(),
                email: "me@example.com".to_string(),
                first_name: Some("Me".to_string()),
            },
            token: "tok".to_string(),
        }
    }

    #[async_trait]
    impl LearnpathApi for FakeApi {
        async fn playlist_videos(&self, _playlist_id: &str) -> Result<Vec<crate::api::Video>> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch {
                return Err(CliError::Api {
                    status: 500,
                    message: "Error fetching video links".to_string(),
                });
            }
            Ok((0..3).map(video).collect())
        }

        async fn sign_up(&self, _request: &SignUpRequest) -> Result<Session> {
            Ok(session())
        }

        async fn sign_in(&self, _request: &SignInRequest) -> Result<Session> {
            Ok(session())
        }

        async fn save_playlist(
            &self,
            token: &str,
            request: &SavePlaylistRequest,
        ) -> Result<SavedPlaylist> {
            self.saved.lock().unwrap().push((
                token.to_string(),
                request.playlist_id.clone(),
                request.videos.len(),
            ));
            Ok(SavedPlaylist {
                id: Uuid::new_v4(),
                youtube_id: request.playlist_id.clone(),
                videos: Vec::new(),
            })
        }
    }

    fn storage() -> (tempfile::TempDir, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        (dir, storage)
    }

    #[tokio::test]
    async fn test_invalid_url_never_calls_network() {
        let api = FakeApi::default();
        let (_dir, storage) = storage();
        let err = load_playlist(&api, &storage, "https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidUrl));
        assert_eq!(err.to_string(), "Invalid YouTube playlist URL");
        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 0);
        assert!(storage.get::<PlaylistData>(CURRENT_PLAYLIST).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_successful_fetch_is_stored() {
        let api = FakeApi::default();
        let (_dir, storage) = storage();
        let data = load_playlist(&api, &storage, "https://www.youtube.com/playlist?list=PLx&si=1")
            .await
            .unwrap();
        assert_eq!(data.id, "PLx");
        assert_eq!(data.videos.len(), 3);
        assert_eq!(storage.get::<PlaylistData>(CURRENT_PLAYLIST).unwrap(), Some(data));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_playlist() {
        let (_dir, storage) = storage();
        let previous = PlaylistData {
            id: "PLold".to_string(),
            videos: vec![video(9)],
        };
        storage.set(CURRENT_PLAYLIST, &previous).unwrap();

        let api = FakeApi {
            fail_fetch: true,
            ..Default::default()
        };
        let err = load_playlist(&api, &storage, "?list=PLnew").await.unwrap_err();
        assert!(matches!(err, CliError::FetchFailed));
        assert_eq!(err.to_string(), "Error fetching video links. Please try again.");
        assert_eq!(storage.get::<PlaylistData>(CURRENT_PLAYLIST).unwrap(), Some(previous));
    }

    #[tokio::test]
    async fn test_save_requires_session_and_playlist() {
        let api = FakeApi::default();
        let (_dir, storage) = storage();
        assert!(matches!(
            save_current(&api, &storage).await.unwrap_err(),
            CliError::NotSignedIn
        ));

        sign_in(
            &api,
            &storage,
            &SignInRequest {
                email: "me@example.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(matches!(
            save_current(&api, &storage).await.unwrap_err(),
            CliError::NoPlaylist
        ));

        load_playlist(&api, &storage, "?list=PLsave").await.unwrap();
        let saved = save_current(&api, &storage).await.unwrap();
        assert_eq!(saved.youtube_id, "PLsave");
        assert_eq!(
            api.saved.lock().unwrap().as_slice(),
            &[("tok".to_string(), "PLsave".to_string(), 3)]
        );
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let api = FakeApi::default();
        let (_dir, storage) = storage();
        sign_in(
            &api,
            &storage,
            &SignInRequest {
                email: "me@example.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap();
        sign_out(&storage).unwrap();
        assert!(storage.get::<Session>(AUTH_STORAGE).unwrap().is_none());
    }
}
