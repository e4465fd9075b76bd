use thiserror::Error;

/// Errors surfaced to the person at the terminal. `Display` is the message they see.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid YouTube playlist URL")]
    InvalidUrl,

    #[error("Error fetching video links. Please try again.")]
    FetchFailed,

    #[error("Not signed in. Run `learnpath signin` first.")]
    NotSignedIn,

    #[error("No playlist loaded. Run `learnpath fetch <url>` first.")]
    NoPlaylist,

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
