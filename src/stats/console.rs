//! Human-readable console output for collected stats.
//!
//! Nothing here is a stable format; it only exists for people watching a run.

use std::io::{self, Write};

use colored::Colorize;
use tabled::Table;

use crate::{
    types::{
        CurrentPlayback, Item, ItemTableRow, PlayHistory, PlayHistoryTableRow, StatsSnapshot,
    },
    utils,
};

/// Echoes a numbered group as it was fetched, e.g. `1. Name - Detail`.
///
/// Goes to stderr: stdout may be carrying a rendered document.
pub fn print_group<F>(title: &str, items: &[Item], detail: F)
where
    F: Fn(&Item) -> String,
{
    let _ = write_group(&mut io::stderr().lock(), title, items, detail);
}

pub fn write_group<W, F>(out: &mut W, title: &str, items: &[Item], detail: F) -> io::Result<()>
where
    W: Write,
    F: Fn(&Item) -> String,
{
    writeln!(out, "\n{}", format!("{}:", title).magenta())?;
    for (idx, item) in items.iter().enumerate() {
        writeln!(
            out,
            "{}. {} - {}",
            idx + 1,
            item.name.cyan(),
            detail(item).green()
        )?;
    }
    Ok(())
}

pub fn print_now_playing(playback: Option<&CurrentPlayback>) {
    let Some(playback) = playback else {
        return;
    };
    if !playback.is_playing {
        return;
    }
    if let Some(track) = &playback.item {
        println!(
            "\n{}",
            format!(
                "Now Playing: {} - {}",
                track.name,
                utils::join_artist_names(&track.artists)
            )
            .magenta()
        );
    }
}

pub fn print_snapshot(snapshot: &StatsSnapshot) {
    for (time_range, items) in &snapshot.top_artists {
        print_table(&format!("Top Artists ({})", time_range), items, |i| {
            i.genre_or_default().to_string()
        });
    }
    for (time_range, items) in &snapshot.top_songs {
        print_table(&format!("Top Songs ({})", time_range), items, |i| {
            i.artist_or_default().to_string()
        });
    }
    print_table("Recently Saved Albums", &snapshot.last_albums, |i| {
        i.artist_or_default().to_string()
    });
}

pub fn print_recently_played(history: &[PlayHistory]) {
    let rows: Vec<PlayHistoryTableRow> = history
        .iter()
        .map(|h| PlayHistoryTableRow {
            played_at: h.played_at.clone(),
            track: h.track.name.clone(),
            artists: utils::join_artist_names(&h.track.artists),
        })
        .collect();

    println!("\n{}", "Recently Played:".magenta());
    println!("{}", Table::new(rows));
}

fn print_table<F>(title: &str, items: &[Item], detail: F)
where
    F: Fn(&Item) -> String,
{
    let rows: Vec<ItemTableRow> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| ItemTableRow {
            rank: idx + 1,
            name: item.name.clone(),
            detail: detail(item),
        })
        .collect();

    println!("\n{}", format!("{}:", title).magenta());
    println!("{}", Table::new(rows));
}
