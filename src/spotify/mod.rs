//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by spotstats:
//! the OAuth authorization-code flow and an authenticated client for the
//! handful of read-only endpoints the stats collector and the `stats` command
//! need.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Stats Collector / Renderer
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + PKCE)
//!     └── Client (top items, saved albums, playback, history)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 authorization-code flow:
//! - **PKCE + state**: S256 code challenge and a random `state` checked by the callback
//! - **Optional client secret**: sent with token requests when configured
//! - **Browser Integration**: Automatic browser launch for user authorization
//! - **Local Callback Server**: Temporary HTTP server for receiving OAuth callbacks
//! - **Token Refresh**: Exchanges a refresh token for a fresh access token
//!
//! ### Client Module
//!
//! [`SpotifyClient`] - Authenticated, read-only API access:
//! - Implements [`StatsSource`](crate::stats::StatsSource) for the collector
//! - Current playback and recently played tracks for the `stats` command
//! - Maps 401, 429 and other failures onto [`ApiError`](crate::error::ApiError)
//!
//! ## Error Handling
//!
//! Requests are sent exactly once. Rate limits (`429`) surface as
//! `ApiError::RateLimited` carrying the `Retry-After` value; the caller decides
//! whether to try the whole run again later.
//!
//! ## API Coverage
//!
//! - `GET /me/player` - Current playback state
//! - `GET /me/top/artists` - Top artists for a time range
//! - `GET /me/top/tracks` - Top tracks for a time range
//! - `GET /me/albums` - Saved albums, most recent first
//! - `GET /me/player/recently-played` - Recently played tracks
//! - `POST /api/token` - Token exchange and refresh operations
//!
//! ## Usage Patterns
//!
//! ```rust
//! let client = SpotifyClient::new(TokenManager::load_or_env().await?)?;
//! let artists = client.top_artists(TimeRange::ShortTerm, 5).await?;
//! let playing = client.current_playback().await?;
//! ```

pub mod auth;
mod client;

pub use client::SpotifyClient;
