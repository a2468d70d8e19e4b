use std::path::PathBuf;

use chrono::Utc;

use crate::{config, error::AuthError, spotify, types::Token};

/// Refresh this many seconds before the access token actually expires.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Builds a manager around a refresh token only. The access token is
    /// treated as expired, so the first request triggers a refresh.
    pub fn from_refresh_token(refresh_token: String) -> Self {
        Self {
            token: Token {
                access_token: String::new(),
                refresh_token,
                scope: config::spotify_scope(),
                expires_in: 0,
                obtained_at: 0,
            },
        }
    }

    pub async fn load() -> Result<Self, AuthError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| AuthError::Cache(format!("{}: {}", path.display(), e)))?;
        let token: Token =
            serde_json::from_str(&content).map_err(|e| AuthError::Cache(e.to_string()))?;
        Ok(Self { token })
    }

    /// Cached token first, `SPOTIFY_REFRESH_TOKEN` second.
    pub async fn load_or_env() -> Result<Self, AuthError> {
        match Self::load().await {
            Ok(manager) => Ok(manager),
            Err(_) => config::spotify_refresh_token()
                .map(Self::from_refresh_token)
                .ok_or(AuthError::NoToken),
        }
    }

    pub async fn persist(&self) -> Result<(), AuthError> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Cache(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(&self.token).map_err(|e| AuthError::Cache(e.to_string()))?;
        async_fs::write(path, json)
            .await
            .map_err(|e| AuthError::Cache(e.to_string()))
    }

    pub async fn get_valid_token(&mut self) -> Result<String, AuthError> {
        if self.is_expired() {
            let mut new_token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
            // Spotify may omit the refresh token when it is not rotated.
            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            self.token = new_token;
            if let Err(e) = self.persist().await {
                crate::warning!("Failed to save refreshed token to cache: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        self.token.access_token.is_empty()
            || now >= (self.token.obtained_at + self.token.expires_in).saturating_sub(EXPIRY_MARGIN)
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
