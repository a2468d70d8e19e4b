use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, info, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    match spotify::auth::auth(shared_state).await {
        Ok(token) => {
            success!("Authentication successful!");
            info!(
                "Refresh token (set SPOTIFY_REFRESH_TOKEN to run without the browser flow):\n{}",
                token.refresh_token
            );
        }
        Err(e) => error!("Authentication failed. Err: {}", e),
    }
}
