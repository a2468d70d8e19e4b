//! # API Module
//!
//! Handlers of the short-lived HTTP server that `spotstats auth` starts on
//! `SPOTIFY_API_REDIRECT_URI`. The server only lives until Spotify has
//! redirected the browser back with an authorization code.
//!
//! - [`callback`] - `GET /callback`: rejects responses whose `state` differs
//!   from the one sent with the authorization request, then trades the code
//!   (plus the PKCE verifier) for a token and parks it in the shared
//!   [`PkceToken`](crate::types::PkceToken) slot the auth flow polls.
//! - [`health`] - `GET /health`: name and version, handy to check that the
//!   redirect port is really ours.
//!
//! Routing lives in [`crate::server::router`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
