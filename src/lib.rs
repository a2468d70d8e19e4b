//! Spotify Listening Stats Library
//!
//! This library fetches a user's listening statistics from the Spotify Web API
//! and renders them as shareable SVG infographics. It includes modules for the
//! OAuth flow, API communication, stats collection, SVG rendering and the
//! command-line operations built on top of them.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for config, auth, API and render failures
//! - `management` - Token caching and refresh
//! - `render` - SVG infographic renderer and cover art embedding
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `stats` - Collection of the stats snapshot
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotstats::{config, management::TokenManager, render, spotify::SpotifyClient, stats};
//!
//! #[tokio::main]
//! async fn main() -> spotstats::Res<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::new(TokenManager::load_or_env().await?)?;
//!     let snapshot = stats::collect(&client, false).await?;
//!     let request = render::RenderRequest::new("artists", Some("short_term"))?;
//!     let svg = render::Renderer::with_http(render::Profile::Detailed)?
//!         .render(&snapshot, &request)
//!         .await;
//!     println!("{}", svg);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod stats;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer layers (CLI, examples) where errors of different
/// modules meet. Library functions return the typed errors from
/// [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Collecting stats...");
/// info!("Rendered {} infographics", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// The message goes to stderr so that documents written to stdout stay
/// intact. Only the binary and the CLI layer use this macro; library code
/// returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark to stderr.
///
/// # Example
///
/// ```
/// warning!("Failed to fetch cover art from {}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
