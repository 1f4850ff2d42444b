use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::serve::resolver_from_env, config, error, info, management::PlaylistRegistry, success,
    types::PlaylistTableRow,
};

pub async fn create_playlist(title: String) {
    let resolver = match resolver_from_env().await {
        Ok(resolver) => resolver,
        Err(e) => error!("{}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Creating playlist \"{}\"...", title));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = resolver.create_default_playlist(&title).await;
    pb.finish_and_clear();

    match result {
        Ok(record) => success!(
            "Playlist {} ({}) is the new default. Mail tracks to {}@<your inbound domain>.",
            record.id,
            record.remote_key,
            record.id
        ),
        Err(e) => error!("Failed to create playlist: {}", e),
    }
}

pub async fn list_playlists() {
    let registry = match PlaylistRegistry::open(config::playlist_store_path()).await {
        Ok(registry) => registry,
        Err(e) => error!("Cannot open playlist store: {}", e),
    };

    let records = registry.list().await;
    if records.is_empty() {
        info!("No playlists yet. Create one with `playlist-inbox playlist create`.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = records.iter().map(PlaylistTableRow::from).collect();
    let table = Table::new(rows);
    println!("{}", table);
}
