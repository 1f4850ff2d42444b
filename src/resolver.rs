//! Turns "playlist id + free text" into a track added to that playlist.
//!
//! The resolver does not know which channel a message came in on; the email
//! and SMS handlers both call [`MessageResolver::resolve`] and only differ in
//! how they pick the playlist id and how they answer.

use std::sync::Arc;

use crate::{
    error::{ApiError, CreatePlaylistError},
    management::PlaylistRegistry,
    spotify::{AccountSession, CatalogClient},
    types::{PlaylistRecord, PlaylistSnapshot, TrackResult},
    warning,
};

pub struct MessageResolver {
    registry: Arc<PlaylistRegistry>,
    catalog: Arc<CatalogClient>,
    session: Arc<AccountSession>,
}

impl MessageResolver {
    pub fn new(
        registry: Arc<PlaylistRegistry>,
        catalog: Arc<CatalogClient>,
        session: Arc<AccountSession>,
    ) -> Self {
        Self {
            registry,
            catalog,
            session,
        }
    }

    /// Adds the first search hit for `query` to playlist `playlist_id`.
    ///
    /// `Ok(None)` covers every "nothing to do" outcome: unknown or malformed
    /// playlist id, blank query, no search hit. Catalog and auth failures
    /// are returned as errors.
    pub async fn resolve(
        &self,
        playlist_id: &str,
        query: &str,
    ) -> Result<Option<(PlaylistSnapshot, TrackResult)>, ApiError> {
        let Some(playlist) = self.registry.resolve(playlist_id).await else {
            return Ok(None);
        };

        let query = query.trim();
        if query.is_empty() {
            warning!("Empty query for playlist {}", playlist.id);
            return Ok(None);
        }

        let Some(track) = self.catalog.search(&self.session, query).await? else {
            warning!("{} cannot be found on Spotify", query);
            return Ok(None);
        };

        let snapshot = self
            .catalog
            .add_track(&self.session, &playlist.remote_key, &track.key)
            .await?;

        Ok(Some((snapshot, track)))
    }

    /// Creates a Spotify playlist and registers it as the new default.
    pub async fn create_default_playlist(
        &self,
        title: &str,
    ) -> Result<PlaylistRecord, CreatePlaylistError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CreatePlaylistError::EmptyTitle);
        }

        let remote_key = self.catalog.create_playlist(&self.session, title).await?;
        let record = self.registry.create_playlist(&remote_key).await?;
        Ok(record)
    }

    pub fn registry(&self) -> &PlaylistRegistry {
        &self.registry
    }
}
