use crate::{
    error,
    management::TokenManager,
    spotify::SpotifyClient,
    stats::{self, console},
    types::StatsSnapshot,
    utils, warning,
};

const RECENTLY_PLAYED_LIMIT: u32 = 5;

/// Prints the user's listening stats to the console.
///
/// Shows what is playing right now, every group of the stats snapshot as a
/// table and the most recently played tracks. With `verbose`, the groups are
/// echoed while they are fetched instead of being tabled afterwards.
///
/// # Error Handling
///
/// - Missing credentials terminate with a hint to run `spotstats auth`
/// - A failed playback lookup only prints a warning
/// - Any failure while collecting terminates the run
pub async fn stats(verbose: bool) {
    let client = load_client().await;

    match client.current_playback().await {
        Ok(playback) => console::print_now_playing(playback.as_ref()),
        Err(e) => warning!("Cannot read current playback. Err: {}", e),
    }

    let snapshot = collect_snapshot(&client, verbose).await;
    if !verbose {
        console::print_snapshot(&snapshot);
    }

    match client.recently_played(RECENTLY_PLAYED_LIMIT).await {
        Ok(history) => console::print_recently_played(&history),
        Err(e) => error!("Failed to fetch recently played tracks. Err: {}", e),
    }
}

pub(crate) async fn load_client() -> SpotifyClient {
    let token_mgr = match TokenManager::load_or_env().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run spotstats auth\n Error: {}",
                e
            );
        }
    };

    match SpotifyClient::new(token_mgr) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    }
}

pub(crate) async fn collect_snapshot(client: &SpotifyClient, verbose: bool) -> StatsSnapshot {
    if verbose {
        return match stats::collect(client, true).await {
            Ok(snapshot) => snapshot,
            Err(e) => error!("Failed to collect stats. Err: {}", e),
        };
    }

    let pb = utils::spinner("Collecting listening stats...");
    let result = stats::collect(client, false).await;
    pb.finish_and_clear();

    match result {
        Ok(snapshot) => snapshot,
        Err(e) => error!("Failed to collect stats. Err: {}", e),
    }
}
