//! Error types shared across the crate.
//!
//! Each layer owns one enum: configuration lookups fail with [`ConfigError`],
//! the OAuth flow and token handling with [`AuthError`], calls against the
//! Spotify Web API with [`ApiError`] and infographic requests with
//! [`RenderError`]. Image fetch failures never show up here; the embedder
//! recovers from them on its own.

use thiserror::Error;

/// A required configuration value could not be resolved.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Failures of the authorization-code flow and of token management.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Token endpoint rejected the request ({status}): {message}")]
    TokenEndpoint { status: u16, message: String },

    #[error("Token response is missing `{0}`")]
    MalformedToken(&'static str),

    #[error("The given state does not match the original state")]
    StateMismatch,

    #[error("Authentication failed or timed out")]
    Timeout,

    #[error("No cached token and no refresh token configured. Please run spotstats auth")]
    NoToken,

    #[error("Token cache error: {0}")]
    Cache(String),

    #[error("Callback server error: {0}")]
    Server(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Any failure reported by the Spotify Web API client.
///
/// The stats collector never recovers from these; the whole collection run
/// fails with the first one it sees.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access token was rejected: {0}")]
    Unauthorized(String),

    #[error("Request rate limit hit{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    #[error("Unhandled API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error(transparent)]
    Token(#[from] AuthError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A render request that cannot be turned into a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unknown section `{0}`; expected one of artists, songs, albums")]
    UnknownSection(String),

    #[error("Unknown time range `{0}`; expected one of short_term, medium_term, long_term")]
    UnknownTimeRange(String),

    #[error("Unknown profile `{0}`; expected one of detailed, compact")]
    UnknownProfile(String),
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("; retry after {} seconds", secs),
        None => String::new(),
    }
}
