use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use thiserror::Error;

use crate::warning;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Turns a remote image URL into a self-contained `data:` URI.
///
/// Implementations never fail: anything that goes wrong yields `None` and
/// the renderer draws a placeholder instead.
#[async_trait]
pub trait ImageEmbedder: Send + Sync {
    async fn embed(&self, url: &str) -> Option<String>;
}

#[derive(Debug, Error)]
enum ImageFetchError {
    #[error("server answered {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Fetches images over HTTP with a bounded timeout. One attempt per URL,
/// nothing is cached between calls.
pub struct HttpEmbedder {
    http: Client,
}

impl HttpEmbedder {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http))
    }

    /// Uses a preconfigured client; its timeout bounds every fetch.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    async fn fetch(&self, url: &str) -> Result<(String, Vec<u8>), ImageFetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status(status));
        }

        let content_type = media_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );

        let bytes = response.bytes().await?;
        Ok((content_type, bytes.to_vec()))
    }
}

#[async_trait]
impl ImageEmbedder for HttpEmbedder {
    async fn embed(&self, url: &str) -> Option<String> {
        match self.fetch(url).await {
            Ok((content_type, bytes)) => Some(data_uri(&content_type, &bytes)),
            Err(e) => {
                warning!("Failed to embed image {}: {}", url, e);
                None
            }
        }
    }
}

/// Bare media type of a `Content-Type` header value, parameters dropped.
fn media_type(header: Option<&str>) -> String {
    header
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}
