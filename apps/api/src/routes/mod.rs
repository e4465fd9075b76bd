pub mod health;
pub mod pages;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::{gate::session_gate, handlers as auth_handlers};
use crate::playlists::handlers as playlist_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Browser pages sit behind the cookie-presence gate
    let pages = Router::new()
        .route("/dashboard", get(pages::dashboard_page))
        .route("/paths", get(pages::paths_page))
        .route("/signin", get(pages::signin_page))
        .route("/signup", get(pages::signup_page))
        .route_layer(middleware::from_fn(session_gate));

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/auth/signup", post(auth_handlers::handle_signup))
        .route("/api/auth/signin", post(auth_handlers::handle_signin))
        // Playlist API
        .route(
            "/api/getPlaylistVideos",
            get(playlist_handlers::handle_get_playlist_videos),
        )
        .route(
            "/api/playlists",
            post(playlist_handlers::handle_save_playlist)
                .get(playlist_handlers::handle_list_playlists),
        )
        .route(
            "/api/playlists/:id",
            get(playlist_handlers::handle_get_playlist),
        )
        .merge(pages)
        .with_state(state)
}
