use std::sync::Arc;

use crate::auth::token::TokenSigner;
use crate::store::{PlaylistStore, UserStore};
use crate::youtube::PlaylistSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub playlists: Arc<dyn PlaylistStore>,
    /// Where playlist listings come from. Production: `YouTubeClient`.
    pub source: Arc<dyn PlaylistSource>,
    pub tokens: TokenSigner,
}
