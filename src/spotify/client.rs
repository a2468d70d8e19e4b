use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    config,
    error::ApiError,
    management::TokenManager,
    stats::StatsSource,
    types::{
        Artist, CurrentPlayback, ErrorResponse, Paging, PlayHistory, SavedAlbum, TimeRange, Track,
    },
};

/// Authenticated client for the read-only endpoints spotstats uses.
///
/// Every request asks the [`TokenManager`] for a valid access token first,
/// so an expired token is refreshed transparently. Requests are sent once;
/// there is no retry on rate limits or server errors.
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    /// Creates a client against the configured `SPOTIFY_API_URL`.
    pub fn new(tokens: TokenManager) -> Result<Self, ApiError> {
        Self::with_base_url(tokens, config::spotify_apiurl())
    }

    pub fn with_base_url(
        tokens: TokenManager,
        base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(http, tokens, base_url))
    }

    pub fn with_client(http: Client, tokens: TokenManager, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    /// Retrieves what the user is playing right now.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(playback))` - playback state of the active device
    /// - `Ok(None)` - nothing is playing (Spotify answers `204 No Content`)
    ///
    /// # API Endpoint
    ///
    /// `GET /me/player`, requires the `user-read-playback-state` scope.
    pub async fn current_playback(&self) -> Result<Option<CurrentPlayback>, ApiError> {
        let response = self.get("/me/player", &[]).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|e| ApiError::Status {
            status: StatusCode::OK.as_u16(),
            message: format!("Malformed playback response: {}", e),
        })
    }

    /// Retrieves the user's most recently played tracks, newest first.
    ///
    /// # API Endpoint
    ///
    /// `GET /me/player/recently-played?limit=`, requires the
    /// `user-read-recently-played` scope.
    pub async fn recently_played(&self, limit: u32) -> Result<Vec<PlayHistory>, ApiError> {
        let page: Paging<PlayHistory> = self
            .get_json("/me/player/recently-played", &[("limit", limit.to_string())])
            .await?;
        Ok(page.items)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.get(path, query).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, ApiError> {
        let token = self.tokens.lock().await.get_valid_token().await?;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        check_status(response).await
    }
}

#[async_trait]
impl StatsSource for SpotifyClient {
    /// `GET /me/top/artists?time_range=&limit=`
    async fn top_artists(
        &self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<Artist>, ApiError> {
        let page: Paging<Artist> = self
            .get_json(
                "/me/top/artists",
                &[
                    ("time_range", time_range.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// `GET /me/top/tracks?time_range=&limit=`
    async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Track>, ApiError> {
        let page: Paging<Track> = self
            .get_json(
                "/me/top/tracks",
                &[
                    ("time_range", time_range.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// `GET /me/albums?limit=`
    async fn saved_albums(&self, limit: u32) -> Result<Vec<SavedAlbum>, ApiError> {
        let page: Paging<SavedAlbum> = self
            .get_json("/me/albums", &[("limit", limit.to_string())])
            .await?;
        Ok(page.items)
    }
}

/// Maps non-success responses onto [`ApiError`].
///
/// Spotify wraps error details as `{"error": {"status": .., "message": ..}}`;
/// when the body has a different shape the raw text is used as the message.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(e) => e.error.message,
        Err(_) if body.is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body,
    };

    Err(match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { retry_after },
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    })
}
