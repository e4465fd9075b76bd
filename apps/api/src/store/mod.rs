//! Persistence seams. `AppState` carries `Arc<dyn UserStore>` and
//! `Arc<dyn PlaylistStore>`; `PgStore` backs both in production.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::playlist::{PlaylistGraph, PlaylistRow, VideoInput};
use crate::models::user::{NewUser, UserRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError>;

    /// Inserts a new account. Returns `None` when the email is already taken.
    async fn create_user(&self, user: NewUser) -> Result<Option<UserRow>, AppError>;
}

#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn find_playlist(
        &self,
        youtube_id: &str,
        user_id: Uuid,
    ) -> Result<Option<PlaylistRow>, AppError>;

    /// Inserts the parent row and every video in one write, videos positioned
    /// by their index. Returns `None` if a row for `(youtube_id, user_id)`
    /// already exists at insert time.
    async fn insert_playlist(
        &self,
        user_id: Uuid,
        youtube_id: &str,
        videos: &[VideoInput],
    ) -> Result<Option<PlaylistGraph>, AppError>;

    async fn get_playlist(&self, id: Uuid) -> Result<Option<PlaylistGraph>, AppError>;

    /// All playlists saved by a user, newest first.
    async fn list_playlists(&self, user_id: Uuid) -> Result<Vec<PlaylistGraph>, AppError>;
}
