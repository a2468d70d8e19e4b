use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tokio::process::Command;

async fn token() -> impl IntoResponse {
    Json(json!({
        "access_token": "cli-access-token",
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": "user-top-read"
    }))
}

async fn top_artists() -> impl IntoResponse {
    Json(json!({
        "items": [{"id": "a1", "name": "Echoed Artist", "genres": ["pop"], "images": []}],
        "next": null,
        "total": 1
    }))
}

async fn top_tracks() -> impl IntoResponse {
    Json(json!({
        "items": [{
            "id": "t1",
            "name": "Echoed Song",
            "artists": [{"id": "a1", "name": "Echoed Artist"}],
            "album": {"id": "al1", "name": "Single", "artists": [], "images": []}
        }],
        "next": null,
        "total": 1
    }))
}

async fn saved_albums() -> impl IntoResponse {
    Json(json!({
        "items": [{
            "added_at": "2024-06-01T12:00:00Z",
            "album": {"id": "al2", "name": "Echoed Album", "artists": [], "images": []}
        }],
        "next": null,
        "total": 1
    }))
}

async fn spawn_spotify() -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me/top/artists", get(top_artists))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/v1/me/albums", get(saved_albums));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_verbose_render_keeps_stdout_for_the_document() {
    let base = spawn_spotify().await;
    let data_home = std::env::temp_dir().join(format!("spotstats-cli-{}", std::process::id()));

    let output = Command::new(env!("CARGO_BIN_EXE_spotstats"))
        .args(["render", "--section", "artists", "--time-range", "short_term", "--verbose"])
        .env("XDG_DATA_HOME", &data_home)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env("NO_PROXY", "127.0.0.1,localhost")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env_remove("SPOTIFY_API_AUTH_CLIENT_SECRET")
        .env("SPOTIFY_API_AUTH_CLIENT_ID", "cli-test-client")
        .env("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback")
        .env("SPOTIFY_REFRESH_TOKEN", "cli-refresh-token")
        .env("SPOTIFY_API_TOKEN_URL", format!("{}/api/token", base))
        .env("SPOTIFY_API_URL", format!("{}/v1", base))
        .output()
        .await
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let _ = std::fs::remove_dir_all(&data_home);

    assert!(output.status.success(), "{}", stderr);

    // The echoed groups go to stderr, the document alone to stdout
    assert!(stdout.starts_with("<svg"), "{}", stdout);
    assert!(stdout.ends_with("</svg>\n"));
    assert!(stdout.contains(">Echoed Artist</text>"));
    assert!(!stdout.contains("Top Artists (short_term):"));

    assert!(stderr.contains("Top Artists (short_term):"));
    assert!(stderr.contains("1. Echoed Artist - pop"));
    assert!(stderr.contains("Recently Saved Albums:"));
}
