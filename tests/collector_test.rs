use std::sync::Mutex;

use async_trait::async_trait;
use spotstats::error::ApiError;
use spotstats::stats::{self, StatsSource};
use spotstats::types::{
    Album, Artist, Image, Item, SavedAlbum, SimpleArtist, TimeRange, Track,
};

// Helper function to create a test image list
fn images(url: Option<&str>) -> Vec<Image> {
    url.map(|url| Image {
        url: url.to_string(),
        height: Some(640),
        width: Some(640),
    })
    .into_iter()
    .collect()
}

fn simple_artists(names: &[&str]) -> Vec<SimpleArtist> {
    names
        .iter()
        .map(|name| SimpleArtist {
            id: None,
            name: name.to_string(),
        })
        .collect()
}

fn create_test_artist(name: &str, genres: &[&str], image: Option<&str>) -> Artist {
    Artist {
        id: format!("{}_id", name),
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        images: images(image),
    }
}

fn create_test_album(name: &str, artists: &[&str], image: Option<&str>) -> Album {
    Album {
        id: Some(format!("{}_id", name)),
        name: name.to_string(),
        artists: simple_artists(artists),
        images: images(image),
    }
}

fn create_test_track(name: &str, artists: &[&str], image: Option<&str>) -> Track {
    Track {
        id: Some(format!("{}_id", name)),
        name: name.to_string(),
        artists: simple_artists(artists),
        album: create_test_album(&format!("{} (Single)", name), artists, image),
    }
}

/// In-memory source that records every call and can fail on one of them.
#[derive(Default)]
struct FakeSource {
    calls: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl FakeSource {
    fn failing_on(call: &'static str) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let fail = self.fail_on == Some(call.as_str());
        self.calls.lock().unwrap().push(call);
        if fail {
            return Err(ApiError::RateLimited {
                retry_after: Some(3),
            });
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsSource for FakeSource {
    async fn top_artists(
        &self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<Artist>, ApiError> {
        self.record(format!("top_artists:{}:{}", time_range, limit))?;
        Ok(match time_range {
            TimeRange::ShortTerm => vec![
                create_test_artist(
                    "Fresh",
                    &["indie pop", "bedroom pop"],
                    Some("https://img/fresh"),
                ),
                create_test_artist("Genreless", &[], None),
            ],
            _ => vec![create_test_artist(
                "Classic",
                &["classic rock"],
                Some("https://img/classic"),
            )],
        })
    }

    async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Track>, ApiError> {
        self.record(format!("top_tracks:{}:{}", time_range, limit))?;
        Ok(match time_range {
            TimeRange::ShortTerm => vec![
                create_test_track("Duet", &["First", "Second"], Some("https://img/duet")),
                create_test_track("Orphan", &[], None),
            ],
            _ => vec![create_test_track("Evergreen", &["Classic"], Some("https://img/evergreen"))],
        })
    }

    async fn saved_albums(&self, limit: u32) -> Result<Vec<SavedAlbum>, ApiError> {
        self.record(format!("saved_albums:{}", limit))?;
        Ok(vec![SavedAlbum {
            added_at: "2024-05-01T10:00:00Z".to_string(),
            album: create_test_album("Fresh Album", &["Fresh", "Guest"], Some("https://img/album")),
        }])
    }
}

#[tokio::test]
async fn test_collect_builds_snapshot() {
    let source = FakeSource::default();
    let snapshot = stats::collect(&source, false).await.unwrap();

    assert_eq!(
        snapshot.artists(TimeRange::ShortTerm),
        &[
            Item::artist("Fresh", Some("indie pop"), Some("https://img/fresh")),
            Item::artist("Genreless", Some("N/A"), None),
        ]
    );
    assert_eq!(
        snapshot.artists(TimeRange::LongTerm),
        &[Item::artist("Classic", Some("classic rock"), Some("https://img/classic"))]
    );

    // Songs use the first-listed artist and the album artwork
    assert_eq!(
        snapshot.songs(TimeRange::ShortTerm),
        &[
            Item::song("Duet", "First", Some("https://img/duet")),
            Item::song("Orphan", "Unknown", None),
        ]
    );
    assert_eq!(
        snapshot.songs(TimeRange::LongTerm),
        &[Item::song("Evergreen", "Classic", Some("https://img/evergreen"))]
    );

    // Saved albums never carry an image
    assert_eq!(snapshot.albums(), &[Item::album("Fresh Album", "Fresh")]);
}

#[tokio::test]
async fn test_collect_only_keeps_collected_windows() {
    let source = FakeSource::default();
    let snapshot = stats::collect(&source, false).await.unwrap();

    let artist_windows: Vec<TimeRange> = snapshot.top_artists.keys().copied().collect();
    let song_windows: Vec<TimeRange> = snapshot.top_songs.keys().copied().collect();
    assert_eq!(artist_windows, stats::COLLECTED_RANGES.to_vec());
    assert_eq!(song_windows, stats::COLLECTED_RANGES.to_vec());
    assert!(snapshot.artists(TimeRange::MediumTerm).is_empty());
}

#[tokio::test]
async fn test_collect_request_order_and_limits() {
    let source = FakeSource::default();
    stats::collect(&source, false).await.unwrap();

    assert_eq!(
        source.calls(),
        vec![
            "top_artists:short_term:5",
            "top_artists:long_term:5",
            "top_tracks:short_term:5",
            "top_tracks:long_term:5",
            "saved_albums:3",
        ]
    );
}

#[tokio::test]
async fn test_collect_echo_returns_same_snapshot() {
    let quiet = stats::collect(&FakeSource::default(), false).await.unwrap();
    let echoed = stats::collect(&FakeSource::default(), true).await.unwrap();
    assert_eq!(quiet, echoed);
}

#[tokio::test]
async fn test_collect_stops_on_first_error() {
    let source = FakeSource::failing_on("top_tracks:long_term:5");
    let result = stats::collect(&source, false).await;

    assert!(matches!(
        result,
        Err(ApiError::RateLimited {
            retry_after: Some(3)
        })
    ));

    // Nothing after the failing call is requested
    assert_eq!(
        source.calls(),
        vec![
            "top_artists:short_term:5",
            "top_artists:long_term:5",
            "top_tracks:short_term:5",
            "top_tracks:long_term:5",
        ]
    );
}

#[tokio::test]
async fn test_collect_error_on_first_call() {
    let source = FakeSource::failing_on("top_artists:short_term:5");
    let err = stats::collect(&source, false).await.unwrap_err();

    assert_eq!(err.to_string(), "Request rate limit hit; retry after 3 seconds");
    assert_eq!(source.calls().len(), 1);
}
