use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::RenderError;

pub const NO_GENRE: &str = "N/A";
pub const UNKNOWN_ARTIST: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
}

/// Lookback window the API aggregates top items over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Roughly the last 4 weeks.
    ShortTerm,
    /// Roughly the last 6 months.
    MediumTerm,
    /// All time.
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short_term" | "short" => Ok(TimeRange::ShortTerm),
            "medium_term" | "medium" => Ok(TimeRange::MediumTerm),
            "long_term" | "long" => Ok(TimeRange::LongTerm),
            _ => Err(RenderError::UnknownTimeRange(s.to_string())),
        }
    }
}

// Spotify Web API payloads. Only the fields spotstats reads are modelled.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbum {
    pub added_at: String,
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub played_at: String,
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPlayback {
    pub is_playing: bool,
    pub item: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

/// A single ranked entry of a stats group.
///
/// `genre` is filled for artists, `artist` for songs and albums. A missing
/// image is an expected state and renders as a placeholder card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub genre: Option<String>,
    pub artist: Option<String>,
    pub image: Option<String>,
}

impl Item {
    pub fn artist(name: &str, genre: Option<&str>, image: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            genre: genre.map(str::to_string),
            artist: None,
            image: image.map(str::to_string),
        }
    }

    pub fn song(name: &str, artist: &str, image: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            genre: None,
            artist: Some(artist.to_string()),
            image: image.map(str::to_string),
        }
    }

    pub fn album(name: &str, artist: &str) -> Self {
        Self {
            name: name.to_string(),
            genre: None,
            artist: Some(artist.to_string()),
            image: None,
        }
    }

    pub fn genre_or_default(&self) -> &str {
        self.genre.as_deref().unwrap_or(NO_GENRE)
    }

    pub fn artist_or_default(&self) -> &str {
        self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }
}

/// Everything one collection run fetched. Rank is the position in each list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub top_artists: BTreeMap<TimeRange, Vec<Item>>,
    pub top_songs: BTreeMap<TimeRange, Vec<Item>>,
    pub last_albums: Vec<Item>,
}

impl StatsSnapshot {
    pub fn artists(&self, time_range: TimeRange) -> &[Item] {
        self.top_artists
            .get(&time_range)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn songs(&self, time_range: TimeRange) -> &[Item] {
        self.top_songs
            .get(&time_range)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn albums(&self) -> &[Item] {
        &self.last_albums
    }
}

#[derive(Tabled)]
pub struct ItemTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub detail: String,
}

#[derive(Tabled)]
pub struct PlayHistoryTableRow {
    pub played_at: String,
    pub track: String,
    pub artists: String,
}
