use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{error::AuthError, spotify, types::PkceToken, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let verifier = {
        let state = shared_state.lock().await;
        let Some(pkce_state) = state.as_ref() else {
            return Html("<h4>Missing PKCE code verifier.</h4>");
        };

        if params.get("state") != Some(&pkce_state.state) {
            warning!("{}", AuthError::StateMismatch);
            return Html("<h4>Login failed: state mismatch.</h4>");
        }

        pkce_state.code_verifier.clone()
    };

    // Unlocked while the token endpoint answers.
    let token = match spotify::auth::exchange_code(code, &verifier).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Html("<h4>Login failed.</h4>");
        }
    };

    match shared_state.lock().await.as_mut() {
        Some(pkce_state) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        None => Html("<h4>Missing PKCE code verifier.</h4>"),
    }
}
