//! # CLI Module
//!
//! This module provides the command-line interface layer for spotstats. It
//! implements all user-facing commands and coordinates between the Spotify
//! client, the stats collector and the SVG renderer.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the Spotify authorization-code flow and caches the token
//!
//! ### Stats
//!
//! - [`stats`] - Prints now playing, top artists/songs, saved albums and
//!   recently played tracks to the console
//!
//! ### Infographics
//!
//! - [`render`] - Renders one section/time range as SVG to a file or stdout
//! - [`render_all`] - Renders every combination into a directory
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Stats Collector / Renderer
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Error Handling
//!
//! Commands are the only place where errors end the process: failures are
//! reported with the `error!` macro and exit code 1. Broken cover art never
//! does; it only turns into a placeholder card.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotstats auth                                   # Authenticate with Spotify
//! spotstats stats                                  # Show stats in the terminal
//! spotstats render --section songs --time-range long_term --output songs.svg
//! spotstats render --all --out-dir ./stats --profile compact
//! ```

mod auth;
mod render;
mod stats;

pub use auth::auth;
pub use render::render;
pub use render::render_all;
pub use stats::stats;
