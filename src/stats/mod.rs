//! # Stats Module
//!
//! Collects the user's listening statistics into an immutable
//! [`StatsSnapshot`](crate::types::StatsSnapshot).
//!
//! The collector only talks to a [`StatsSource`], the read-only view of the
//! Spotify Web API it needs. [`SpotifyClient`](crate::spotify::SpotifyClient)
//! is the production implementation; tests plug in an in-memory source.
//!
//! ## Query sequence
//!
//! Every run issues the same five requests, one after the other:
//!
//! 1. top artists, `short_term`, limit 5
//! 2. top artists, `long_term`, limit 5
//! 3. top tracks, `short_term`, limit 5
//! 4. top tracks, `long_term`, limit 5
//! 5. saved albums, limit 3
//!
//! The first failing request aborts the run; no partial snapshot is returned.

mod collector;
pub mod console;

use async_trait::async_trait;

use crate::{
    error::ApiError,
    types::{Artist, SavedAlbum, TimeRange, Track},
};

pub use collector::{COLLECTED_RANGES, SAVED_ALBUMS_LIMIT, TOP_ITEMS_LIMIT, collect};

/// Read operations the collector needs from the Spotify Web API.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// The current user's top artists for `time_range`, best first.
    async fn top_artists(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Artist>, ApiError>;

    /// The current user's top tracks for `time_range`, best first.
    async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Track>, ApiError>;

    /// The current user's saved albums, most recently saved first.
    async fn saved_albums(&self, limit: u32) -> Result<Vec<SavedAlbum>, ApiError>;
}
