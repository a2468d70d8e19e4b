use std::collections::BTreeMap;

use crate::{
    error::ApiError,
    stats::{StatsSource, console},
    types::{Artist, Item, NO_GENRE, SavedAlbum, StatsSnapshot, TimeRange, Track},
    utils,
};

pub const TOP_ITEMS_LIMIT: u32 = 5;
pub const SAVED_ALBUMS_LIMIT: u32 = 3;
pub const COLLECTED_RANGES: [TimeRange; 2] = [TimeRange::ShortTerm, TimeRange::LongTerm];

/// Fetches all stats groups from `source` and assembles them into a snapshot.
///
/// Requests are issued serially in a fixed order (artists for both windows,
/// tracks for both windows, then saved albums). With `echo` set, every group
/// is printed to the console as soon as it arrives.
///
/// # Errors
///
/// The first [`ApiError`] returned by `source` is propagated unchanged and no
/// snapshot is produced.
///
/// # Example
///
/// ```
/// let client = SpotifyClient::new(TokenManager::load_or_env().await?)?;
/// let snapshot = stats::collect(&client, true).await?;
/// println!("{} saved albums", snapshot.albums().len());
/// ```
pub async fn collect<S>(source: &S, echo: bool) -> Result<StatsSnapshot, ApiError>
where
    S: StatsSource + ?Sized,
{
    let mut top_artists = BTreeMap::new();
    for time_range in COLLECTED_RANGES {
        let artists = source.top_artists(time_range, TOP_ITEMS_LIMIT).await?;
        let items: Vec<Item> = artists.iter().map(artist_item).collect();
        if echo {
            console::print_group(&format!("Top Artists ({})", time_range), &items, |i| {
                i.genre_or_default().to_string()
            });
        }
        top_artists.insert(time_range, items);
    }

    let mut top_songs = BTreeMap::new();
    for time_range in COLLECTED_RANGES {
        let tracks = source.top_tracks(time_range, TOP_ITEMS_LIMIT).await?;
        let items: Vec<Item> = tracks.iter().map(track_item).collect();
        if echo {
            console::print_group(&format!("Top Songs ({})", time_range), &items, |i| {
                i.artist_or_default().to_string()
            });
        }
        top_songs.insert(time_range, items);
    }

    let albums = source.saved_albums(SAVED_ALBUMS_LIMIT).await?;
    let last_albums: Vec<Item> = albums.iter().map(saved_album_item).collect();
    if echo {
        console::print_group("Recently Saved Albums", &last_albums, |i| {
            i.artist_or_default().to_string()
        });
    }

    Ok(StatsSnapshot {
        top_artists,
        top_songs,
        last_albums,
    })
}

fn artist_item(artist: &Artist) -> Item {
    Item {
        name: artist.name.clone(),
        genre: Some(
            artist
                .genres
                .first()
                .cloned()
                .unwrap_or_else(|| NO_GENRE.to_string()),
        ),
        artist: None,
        image: utils::first_image_url(&artist.images),
    }
}

fn track_item(track: &Track) -> Item {
    Item {
        name: track.name.clone(),
        genre: None,
        artist: Some(utils::primary_artist_name(&track.artists)),
        image: utils::first_image_url(&track.album.images),
    }
}

// Saved albums carry no artwork in the snapshot.
fn saved_album_item(saved: &SavedAlbum) -> Item {
    Item {
        name: saved.album.name.clone(),
        genre: None,
        artist: Some(utils::primary_artist_name(&saved.album.artists)),
        image: None,
    }
}
