//! Configuration management for spotstats.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoint URLs and the address
//! of the local OAuth callback server.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SCOPE: &str =
    "user-library-read user-top-read user-read-recently-played user-read-playback-state";

/// Returns the application's directory inside the local data directory.
///
/// - Linux: `~/.local/share/spotstats`
/// - macOS: `~/Library/Application Support/spotstats`
/// - Windows: `%LOCALAPPDATA%/spotstats`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotstats");
    path
}

/// Loads environment variables from `.env` files.
///
/// Reads `.env` from the current working directory first, then from the local
/// data directory (`spotstats/.env`). Variables that are already set in the
/// process environment are never overwritten. Missing files are not an error;
/// the required values may come from the environment alone.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// use spotstats::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let local = PathBuf::from(".env");
    for path in [local, dir.join(".env")] {
        if path.is_file() {
            dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
        }
    }

    Ok(())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn with_default(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

/// Returns the server address for the local OAuth callback server.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:8888`. The port must match
/// the redirect URI registered for the application.
pub fn server_addr() -> String {
    with_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID for authentication.
///
/// # Errors
///
/// Fails with [`ConfigError::Missing`] if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret, if one is configured.
///
/// The secret is optional: without it the authorization-code flow relies on
/// PKCE alone. When present it is sent along with every token request.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    optional("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify OAuth redirect URI.
///
/// # Errors
///
/// Fails with [`ConfigError::Missing`] if `SPOTIFY_API_REDIRECT_URI` is not set.
pub fn spotify_redirect_uri() -> Result<String, ConfigError> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns a long-lived refresh token, if one is configured.
///
/// `SPOTIFY_REFRESH_TOKEN` allows running without an interactive `auth` step,
/// e.g. from a scheduled job. `spotstats auth` prints the value to store here.
pub fn spotify_refresh_token() -> Option<String> {
    optional("SPOTIFY_REFRESH_TOKEN")
}

/// Returns the Spotify API scope permissions.
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    with_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    with_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}
