//! Configuration for the playlist inbox.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the local data directory:
//! - Linux: `~/.local/share/playlist-inbox/.env`
//! - macOS: `~/Library/Application Support/playlist-inbox/.env`
//! - Windows: `%LOCALAPPDATA%/playlist-inbox/.env`
//!
//! Real environment variables win over the file.

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const APP_DIR: &str = "playlist-inbox";

const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3";
const DEFAULT_REPLY_FROM_NAME: &str = "Playlist Inbox";

/// Loads the `.env` file from the local data directory if there is one.
///
/// A missing file is fine; every value can also come from the environment.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

/// Base directory for everything this service keeps on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn optional(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Address the HTTP server binds to, e.g. `127.0.0.1:8080`.
pub fn server_addr() -> Result<String, ConfigError> {
    required("SERVER_ADDRESS")
}

/// Spotify account that owns the shared playlists.
pub fn spotify_user() -> Result<String, ConfigError> {
    required("SPOTIFY_USER_ID")
}

pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Callback URL registered with the Spotify application.
pub fn spotify_redirect_uri() -> Result<String, ConfigError> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Scopes requested during `auth`, e.g. `playlist-modify-public`.
pub fn spotify_scope() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_SCOPE")
}

pub fn spotify_apiauth_url() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_URL")
}

/// Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> Result<String, ConfigError> {
    required("SPOTIFY_API_URL")
}

pub fn spotify_apitoken_url() -> Result<String, ConfigError> {
    required("SPOTIFY_API_TOKEN_URL")
}

pub fn sendgrid_api_key() -> Result<String, ConfigError> {
    required("SENDGRID_API_KEY")
}

pub fn sendgrid_api_url() -> String {
    optional("SENDGRID_API_URL").unwrap_or_else(|| DEFAULT_SENDGRID_API_URL.to_string())
}

/// Display name used on email replies.
pub fn reply_from_name() -> String {
    optional("REPLY_FROM_NAME").unwrap_or_else(|| DEFAULT_REPLY_FROM_NAME.to_string())
}

pub fn reply_to_address() -> Result<String, ConfigError> {
    required("REPLY_TO_ADDRESS")
}

/// Bearer token that guards the playlist administration routes.
pub fn admin_token() -> Result<String, ConfigError> {
    required("ADMIN_TOKEN")
}

pub fn playlist_store_path() -> PathBuf {
    optional("PLAYLIST_STORE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("playlists.json"))
}

pub fn token_cache_path() -> PathBuf {
    optional("TOKEN_CACHE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("cache/token.json"))
}
