use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    config,
    error::AuthError,
    management::TokenManager,
    server,
    types::{OAuthErrorResponse, PkceToken, Token},
    utils, warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

/// Runs the complete OAuth 2.0 authorization-code flow (with PKCE) against Spotify.
///
/// This function orchestrates the entire authentication process including:
/// 1. Generating the PKCE code verifier/challenge and a random `state`
/// 2. Starting the local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback
/// 5. Persisting the obtained token for future use
///
/// # Arguments
///
/// * `shared_state` - Shared state for the PKCE verifier, the expected `state`
///   and the resulting token, read and written by the callback handler
///
/// # Errors
///
/// - [`AuthError::Config`] if the client ID or redirect URI is not configured
/// - [`AuthError::Server`] if the callback server cannot bind its address
/// - [`AuthError::Timeout`] if no token arrives within two minutes
/// - [`AuthError::Cache`] if the token cannot be written to the cache
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tokio::sync::Mutex;
///
/// let shared_state = Arc::new(Mutex::new(None));
/// let token = auth(shared_state).await?;
/// println!("Refresh token: {}", token.refresh_token);
/// ```
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token, AuthError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let auth_url = authorize_url(&code_challenge, &state)?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            state,
            token: None,
        });
    }

    let listener = server::bind(&config::server_addr()).await?;
    let server_state = Arc::clone(&shared_state);
    let server_task = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server_task.abort();

    let token = token.ok_or(AuthError::Timeout)?;
    TokenManager::new(token.clone()).persist().await?;
    Ok(token)
}

/// Builds the Spotify authorization URL for the given PKCE challenge and state.
///
/// Query values are percent-encoded, so redirect URIs and space-separated
/// scopes can be passed as configured.
///
/// # Errors
///
/// Fails if the client ID or redirect URI is missing, or if the configured
/// authorization URL is not a valid URL.
pub fn authorize_url(code_challenge: &str, state: &str) -> Result<Url, AuthError> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;
    let scope = config::spotify_scope();

    Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("state", state),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| {
        AuthError::Config(crate::error::ConfigError::Invalid(
            "SPOTIFY_API_AUTH_URL",
            e.to_string(),
        ))
    })
}

/// Polls the shared state until the callback handler stored a token.
///
/// Gives up after two minutes and returns `None`.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Refreshes an expired access token using a refresh token.
///
/// # Arguments
///
/// * `refresh_token` - Refresh token obtained from a previous authentication
///
/// # Returns
///
/// A new [`Token`]. Spotify only returns a refresh token when it rotates it;
/// otherwise the returned token's `refresh_token` is empty and the caller
/// keeps the old one.
///
/// # Errors
///
/// Network failures, a rejected refresh token or a response without an access
/// token all fail with an [`AuthError`].
pub async fn refresh_token(refresh_token: &str) -> Result<Token, AuthError> {
    let client_id = config::spotify_client_id()?;
    request_token(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id.as_str()),
    ])
    .await
}

/// Exchanges an authorization code for an access token.
///
/// Completes the authorization-code flow. The PKCE verifier proves that the
/// client finishing the flow is the one that started it; the client secret is
/// added by [`request_token`] when configured.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
/// * `verifier` - PKCE code verifier generated at the start of the flow
///
/// # Example
///
/// ```
/// let token = exchange_code("AQA...auth_code", "dBjftJeZ...verifier").await?;
/// println!("Access token: {}", token.access_token);
/// ```
pub async fn exchange_code(code: &str, verifier: &str) -> Result<Token, AuthError> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    request_token(&[
        ("grant_type", "authorization_code"),
        ("client_id", client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", redirect_uri.as_str()),
    ])
    .await
}

async fn request_token(form: &[(&str, &str)]) -> Result<Token, AuthError> {
    let mut params: Vec<(&str, &str)> = form.to_vec();
    let secret = config::spotify_client_secret();
    if let Some(secret) = secret.as_deref() {
        params.push(("client_secret", secret));
    }

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&params)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        let message = serde_json::from_str::<OAuthErrorResponse>(&body)
            .map(|e| e.error_description.unwrap_or(e.error))
            .unwrap_or(body);
        return Err(AuthError::TokenEndpoint {
            status: status.as_u16(),
            message,
        });
    }

    let json: TokenResponse = res.json().await?;

    Ok(Token {
        access_token: json
            .access_token
            .ok_or(AuthError::MalformedToken("access_token"))?,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
