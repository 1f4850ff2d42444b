use std::path::{Path, PathBuf};

use crate::types::AccessCredential;

/// Token cache on disk, written by `auth` and by every successful refresh.
pub struct TokenManager {
    path: PathBuf,
    token: AccessCredential,
}

impl TokenManager {
    pub fn new(path: impl Into<PathBuf>, token: AccessCredential) -> Self {
        TokenManager {
            path: path.into(),
            token,
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: AccessCredential = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            path: path.to_path_buf(),
            token,
        })
    }

    /// Replaces the cache through a temporary file and a rename.
    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        async_fs::write(&tmp, json)
            .await
            .map_err(|e| format!("{}: {}", tmp.display(), e))?;
        async_fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| format!("{}: {}", self.path.display(), e))
    }

    pub fn into_token(self) -> AccessCredential {
        self.token
    }
}
