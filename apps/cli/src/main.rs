//! Learnpath client: turn a playlist URL into a stored learning path and
//! browse it from the terminal.

mod api;
mod error;
mod extract;
mod form;
mod storage;
mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::{HttpApi, SignInRequest, SignUpRequest};
use crate::storage::LocalStorage;

#[derive(Parser, Debug)]
#[command(name = "learnpath")]
#[command(about = "Build learning paths from video playlists")]
#[command(version)]
struct Args {
    /// Base URL of the Learnpath API
    #[arg(long, default_value = "http://localhost:8080", env = "LEARNPATH_API_URL")]
    api_url: String,

    /// Local storage file (defaults to the user data directory)
    #[arg(long, env = "LEARNPATH_STORAGE")]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a playlist's videos and keep them for `show`
    Fetch { url: String },
    /// Show the last fetched playlist
    Show,
    /// Save the last fetched playlist as a learning path
    Save,
    /// Create an account and keep the session
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEARNPATH_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone_number: Option<String>,
    },
    /// Sign in and keep the session
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEARNPATH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Signout,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "learnpath_cli=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let storage = LocalStorage::new(args.storage.unwrap_or_else(storage::default_path));
    tracing::debug!("Using storage at {}", storage.path().display());
    let api = HttpApi::new(&args.api_url)?;

    match args.command {
        Command::Fetch { url } => {
            let data = form::load_playlist(&api, &storage, &url).await?;
            match data.videos.first() {
                Some(first) => {
                    println!("{} ({} videos)", first.title, data.videos.len());
                    println!("Run `learnpath show` to view all videos in this playlist.");
                }
                None => println!("Playlist {} has no videos.", data.id),
            }
        }
        Command::Show => {
            print!("{}", view::render_playlist(view::load_current(&storage).as_ref()));
        }
        Command::Save => {
            let saved = form::save_current(&api, &storage).await?;
            println!(
                "Saved learning path {} ({} videos) as {}",
                saved.youtube_id,
                saved.videos.len(),
                saved.id
            );
        }
        Command::Signup {
            email,
            password,
            first_name,
            last_name,
            phone_number,
        } => {
            let session = form::sign_up(
                &api,
                &storage,
                &SignUpRequest {
                    email,
                    password,
                    first_name,
                    last_name,
                    phone_number,
                },
            )
            .await?;
            println!("Signed up as {}", session.user.email);
        }
        Command::Signin { email, password } => {
            let session = form::sign_in(&api, &storage, &SignInRequest { email, password }).await?;
            let name = session
                .user
                .first_name
                .as_deref()
                .unwrap_or(&session.user.email);
            println!("Welcome back, {name}");
        }
        Command::Signout => {
            form::sign_out(&storage)?;
            println!("Signed out");
        }
    }

    Ok(())
}
