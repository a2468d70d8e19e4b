use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, error::AuthError, types::PkceToken};

pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

pub async fn bind(addr: &str) -> Result<TcpListener, AuthError> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| AuthError::Server(format!("Failed to parse server address {}: {}", addr, e)))?;

    TcpListener::bind(&addr)
        .await
        .map_err(|e| AuthError::Server(format!("Failed to bind {}: {}", addr, e)))
}

pub async fn serve(
    listener: TcpListener,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<(), AuthError> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| AuthError::Server(e.to_string()))
}
