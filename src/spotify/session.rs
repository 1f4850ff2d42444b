use std::path::PathBuf;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    error::AuthError,
    info,
    management::TokenManager,
    spotify::auth::TokenEndpoint,
    types::AccessCredential,
    warning,
};

/// Holds the credential of the configured account and refreshes it on demand.
pub struct TokenStore {
    endpoint: TokenEndpoint,
    client: Client,
    credential: Mutex<AccessCredential>,
    cache_path: Option<PathBuf>,
}

impl TokenStore {
    pub fn new(endpoint: TokenEndpoint, credential: AccessCredential) -> Self {
        Self {
            endpoint,
            client: Client::new(),
            credential: Mutex::new(credential),
            cache_path: None,
        }
    }

    /// Writes every refreshed credential back to the token cache at `path`.
    pub fn with_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub async fn current_credential(&self) -> AccessCredential {
        self.credential.lock().await.clone()
    }

    /// Trades the refresh token of `stale` for a new access token.
    ///
    /// Exactly one request to the token endpoint per call. If another caller
    /// already replaced `stale` while we waited for the lock, that newer
    /// credential is returned as is.
    pub async fn refresh(&self, stale: &AccessCredential) -> Result<AccessCredential, AuthError> {
        let mut current = self.credential.lock().await;
        if current.access_token != stale.access_token {
            return Ok(current.clone());
        }

        info!("Using the refresh token");
        let fresh = self
            .endpoint
            .refresh(&self.client, &current.refresh_token)
            .await?;
        *current = fresh.clone();

        if let Some(path) = &self.cache_path {
            if let Err(e) = TokenManager::new(path.clone(), fresh.clone()).persist().await {
                warning!("Failed to save refreshed token: {}", e);
            }
        }

        Ok(fresh)
    }
}

/// The single Spotify account every catalog call acts as.
pub struct AccountSession {
    account_id: String,
    tokens: TokenStore,
}

impl AccountSession {
    pub fn new(account_id: impl Into<String>, tokens: TokenStore) -> Self {
        Self {
            account_id: account_id.into(),
            tokens,
        }
    }

    /// Builds the session from configuration and the cached credential.
    pub async fn from_env(token_path: PathBuf) -> Result<Self, String> {
        let endpoint = TokenEndpoint::from_env().map_err(|e| e.to_string())?;
        let account_id = config::spotify_user().map_err(|e| e.to_string())?;
        let credential = TokenManager::load(&token_path)
            .await
            .map_err(|e| format!("Failed to load token, run `playlist-inbox auth` first: {}", e))?
            .into_token();

        Ok(Self::new(
            account_id,
            TokenStore::new(endpoint, credential).with_cache(token_path),
        ))
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }
}
