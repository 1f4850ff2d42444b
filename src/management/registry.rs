use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, MutexGuard};

use crate::{
    error::{ConfigError, RegistryError},
    types::PlaylistRecord,
    warning,
};

/// Maps local playlist ids to Spotify playlist ids and tracks the default.
///
/// All records live in one JSON document. Every mutation rewrites the whole
/// document through a temporary file and a rename, and the in-memory copy is
/// only swapped once the rename went through.
///
/// The file is the source of truth: `serve` and `playlist create` run in
/// separate processes, so every operation re-reads it first.
pub struct PlaylistRegistry {
    path: PathBuf,
    records: Mutex<Vec<PlaylistRecord>>,
}

impl PlaylistRegistry {
    /// Opens the store at `path`. A missing file is an empty registry.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        let records = read_store(&path).await?;

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Looks up a playlist by its local id as it appears in an address.
    ///
    /// Malformed and unknown ids both yield `None`.
    pub async fn resolve(&self, local_id: &str) -> Option<PlaylistRecord> {
        let id = match local_id.trim().parse::<u64>() {
            Ok(id) => id,
            Err(_) => {
                warning!("Invalid playlist ID: {}", local_id);
                return None;
            }
        };

        let records = self.current().await;
        let found = records.iter().find(|r| r.id == id).cloned();
        if found.is_none() {
            warning!("Unknown playlist ID: {}", id);
        }
        found
    }

    pub async fn default_playlist(&self) -> Result<PlaylistRecord, ConfigError> {
        self.current()
            .await
            .iter()
            .find(|r| r.is_default)
            .cloned()
            .ok_or(ConfigError::NoDefaultPlaylist)
    }

    /// Registers `remote_key` as a new playlist and makes it the default.
    pub async fn create_playlist(&self, remote_key: &str) -> Result<PlaylistRecord, RegistryError> {
        let mut records = self.records.lock().await;

        let mut next = read_store(&self.path).await?;
        for record in next.iter_mut() {
            record.is_default = false;
        }

        let record = PlaylistRecord {
            id: next.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            remote_key: remote_key.to_string(),
            is_default: true,
        };
        next.push(record.clone());

        write_atomically(&self.path, &next).await?;
        *records = next;

        Ok(record)
    }

    /// All records ordered by id.
    pub async fn list(&self) -> Vec<PlaylistRecord> {
        let mut records = self.current().await.clone();
        records.sort_by_key(|r| r.id);
        records
    }

    /// Locks the records after syncing them with the store on disk. An
    /// unreadable store keeps the last good copy.
    async fn current(&self) -> MutexGuard<'_, Vec<PlaylistRecord>> {
        let mut records = self.records.lock().await;
        match read_store(&self.path).await {
            Ok(on_disk) => *records = on_disk,
            Err(e) => warning!("Using cached playlists, store unreadable: {}", e),
        }
        records
    }
}

async fn read_store(path: &Path) -> Result<Vec<PlaylistRecord>, RegistryError> {
    match async_fs::read_to_string(path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_atomically(path: &Path, records: &[PlaylistRecord]) -> Result<(), RegistryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    async_fs::write(&tmp, json).await?;
    async_fs::rename(&tmp, path).await?;
    Ok(())
}
