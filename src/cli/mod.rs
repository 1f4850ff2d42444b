//! # CLI Module
//!
//! One function per subcommand. Each prints its own progress with the crate's
//! logging macros and exits through [`crate::error!`] on failure.
//!
//! ```bash
//! playlist-inbox auth                               # store a Spotify token
//! playlist-inbox playlist create --title "Office"   # new default playlist
//! playlist-inbox playlist list                      # show registered playlists
//! playlist-inbox serve                              # run the webhooks
//! ```

mod auth;
mod playlist;
mod serve;

pub use auth::auth;
pub use playlist::create_playlist;
pub use playlist::list_playlists;
pub use serve::resolver_from_env;
pub use serve::serve;
