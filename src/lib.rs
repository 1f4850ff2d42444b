//! Playlist Inbox Library
//!
//! Lets people add a track to a shared Spotify playlist by sending an email
//! or an SMS with a search query. The query is searched on Spotify, the first
//! hit is appended to the playlist and a confirmation goes back on the same
//! channel.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the inbound webhooks and administration
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types of the resolution pipeline
//! - `mailer` - Outbound email through SendGrid
//! - `management` - Token cache and playlist registry on disk
//! - `reply` - Confirmation texts for email and SMS
//! - `resolver` - Query-to-playlist resolution
//! - `server` - Routing and HTTP servers
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mailer;
pub mod management;
pub mod reply;
pub mod resolver;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Boxed error result used by the binary and the interactive flows.
///
/// Library code that callers need to tell apart returns the typed errors in
/// [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Logs a status line with a blue `o`.
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Logs a completed action with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Logs a fatal error in red and exits with status 1.
///
/// Only for startup failures in the binary. Request handlers must never call
/// this; a failed message is logged with [`warning!`] and acknowledged.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Logs a recoverable problem with a yellow `!`.
///
/// This is where not-found outcomes and per-message failures end up.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
