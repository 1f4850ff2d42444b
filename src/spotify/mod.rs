//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here:
//!
//! - [`auth`] - token endpoint (code exchange, refresh) and the interactive
//!   PKCE flow that produces the first credential
//! - [`session`] - [`TokenStore`] and the [`AccountSession`] handed to every
//!   catalog call
//! - [`catalog`] - [`CatalogClient`]: search, add-to-playlist and
//!   create-playlist on top of one authenticated request primitive
//!
//! ## Token lifecycle
//!
//! The credential is loaded from the token cache at startup. Access tokens
//! are not checked for expiry up front; a 401 from the Web API triggers a
//! single refresh followed by a single retry of the same request.
//!
//! ```text
//! request ──► 401 ──► refresh ──► request ──► 401 ──► AuthError
//!    │                               │
//!    └── other status ──► done       └── other status ──► done
//! ```
//!
//! ## API Coverage
//!
//! - `GET /search` - first track for a free-text query
//! - `POST /playlists/{id}/tracks` - append a track
//! - `GET /playlists/{id}` - name and public link after a change
//! - `POST /users/{user_id}/playlists` - create a new playlist
//! - `POST /api/token` - code exchange and refresh

pub mod auth;
pub mod catalog;
pub mod session;

pub use catalog::{ApiCall, CatalogClient};
pub use session::{AccountSession, TokenStore};
