//! # API Module
//!
//! HTTP handlers, grouped by who calls them:
//!
//! - [`sendgrid_add`], [`twilio_add`] - inbound email and SMS webhooks. Both
//!   always acknowledge with 200 so the transports never retry a message.
//! - [`add_playlist`], [`list_playlists`] - administration, guarded by
//!   [`require_admin`]
//! - [`callback`] - OAuth redirect target used while `auth` runs
//! - [`health`] - liveness probe
//!
//! Routing lives in [`crate::server`].

mod health;
mod inbound;
mod oauth;
mod playlists;
mod state;

pub use health::health;
pub use inbound::{sendgrid_add, twilio_add};
pub use oauth::callback;
pub use playlists::{add_playlist, list_playlists, require_admin};
pub use state::{AppState, ReplySettings};
