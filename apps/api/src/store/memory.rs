//! In-process stores used by handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::playlist::{PlaylistGraph, PlaylistRow, PlaylistVideoRow, VideoInput};
use crate::models::user::{NewUser, UserRow};
use crate::store::{PlaylistStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserRow>>,
    playlists: Mutex<Vec<PlaylistGraph>>,
}

impl MemoryStore {
    pub fn playlist_count(&self) -> usize {
        self.playlists.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<Option<UserRow>, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            created_at: now,
            updated_at: now,
        };
        users.push(row.clone());
        Ok(Some(row))
    }
}

#[async_trait]
impl PlaylistStore for MemoryStore {
    async fn find_playlist(
        &self,
        youtube_id: &str,
        user_id: Uuid,
    ) -> Result<Option<PlaylistRow>, AppError> {
        let playlists = self.playlists.lock().unwrap();
        Ok(playlists
            .iter()
            .map(|g| &g.playlist)
            .find(|p| p.youtube_id == youtube_id && p.user_id == user_id)
            .cloned())
    }

    async fn insert_playlist(
        &self,
        user_id: Uuid,
        youtube_id: &str,
        videos: &[VideoInput],
    ) -> Result<Option<PlaylistGraph>, AppError> {
        let mut playlists = self.playlists.lock().unwrap();
        if playlists
            .iter()
            .any(|g| g.playlist.youtube_id == youtube_id && g.playlist.user_id == user_id)
        {
            return Ok(None);
        }
        let now = Utc::now();
        let playlist = PlaylistRow {
            id: Uuid::new_v4(),
            youtube_id: youtube_id.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        let videos = videos
            .iter()
            .enumerate()
            .map(|(i, v)| PlaylistVideoRow {
                id: Uuid::new_v4(),
                playlist_id: playlist.id,
                video_id: v.video_id.clone(),
                title: v.title.clone(),
                thumbnail: v.thumbnail.clone(),
                position: i as i32,
                created_at: now,
                updated_at: now,
            })
            .collect();
        let graph = PlaylistGraph { playlist, videos };
        playlists.push(graph.clone());
        Ok(Some(graph))
    }

    async fn get_playlist(&self, id: Uuid) -> Result<Option<PlaylistGraph>, AppError> {
        let playlists = self.playlists.lock().unwrap();
        Ok(playlists.iter().find(|g| g.playlist.id == id).cloned())
    }

    async fn list_playlists(&self, user_id: Uuid) -> Result<Vec<PlaylistGraph>, AppError> {
        let playlists = self.playlists.lock().unwrap();
        Ok(playlists
            .iter()
            .rev()
            .filter(|g| g.playlist.user_id == user_id)
            .cloned()
            .collect())
    }
}
