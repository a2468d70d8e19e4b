use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Image, SimpleArtist, UNKNOWN_ARTIST};

pub fn generate_code_verifier() -> String {
    random_string(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state() -> String {
    random_string(32)
}

fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// URL of the first (largest) image Spotify lists, if any.
pub fn first_image_url(images: &[Image]) -> Option<String> {
    images.first().map(|i| i.url.clone())
}

/// Name of the first-listed artist, or `"Unknown"` for an empty list.
pub fn primary_artist_name(artists: &[SimpleArtist]) -> String {
    artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
}

pub fn join_artist_names(artists: &[SimpleArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
