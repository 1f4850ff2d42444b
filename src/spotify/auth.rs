use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    error::{AuthError, ConfigError},
    management::TokenManager,
    server::start_auth_server,
    types::{AccessCredential, PkceToken, TokenResponse},
    utils, warning,
};

/// Spotify accounts service endpoint used to mint access tokens.
#[derive(Debug, Clone)]
pub struct TokenEndpoint {
    pub url: String,
    pub client_id: String,
}

impl TokenEndpoint {
    pub fn new(url: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_id: client_id.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            config::spotify_apitoken_url()?,
            config::spotify_client_id()?,
        ))
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Spotify may or may not rotate the refresh token; when the response
    /// carries none, the one we sent stays valid and is kept.
    pub async fn refresh(
        &self,
        client: &Client,
        refresh_token: &str,
    ) -> Result<AccessCredential, AuthError> {
        let res = client
            .post(&self.url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, body });
        }

        let json: TokenResponse = res.json().await?;
        credential_from(json, refresh_token)
    }

    /// Completes the PKCE flow by trading the authorization code for tokens.
    pub async fn exchange_code(
        &self,
        client: &Client,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
    ) -> Result<AccessCredential, AuthError> {
        let res = client
            .post(&self.url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, body });
        }

        let json: TokenResponse = res.json().await?;
        credential_from(json, "")
    }
}

fn credential_from(
    json: TokenResponse,
    previous_refresh_token: &str,
) -> Result<AccessCredential, AuthError> {
    let access_token = json
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingAccessToken)?;

    Ok(AccessCredential {
        access_token,
        refresh_token: json
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| previous_refresh_token.to_string()),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600).max(0) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Runs the OAuth 2.0 PKCE flow and stores the resulting credential.
///
/// 1. Generates a code verifier and its S256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the browser
/// 4. Waits for the callback to deposit a token
/// 5. Writes the token to `token_path`
///
/// The service itself never runs this; it only reads the cached credential.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>, token_path: PathBuf) -> Res<()> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    let addr = config::server_addr()?;
    tokio::spawn(async move {
        if let Err(e) = start_auth_server(&addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url()?,
        client_id = &config::spotify_client_id()?,
        redirect_uri = &config::spotify_redirect_uri()?,
        code_challenge = code_challenge,
        scope = &config::spotify_scope()?
    );

    // verifier must be in place before the browser can hit the callback
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let Some(token) = wait_for_token(shared_state).await else {
        return Err("Authentication failed or timed out.".into());
    };

    TokenManager::new(token_path, token).persist().await?;
    Ok(())
}

/// Polls the shared state once per second for up to a minute.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<AccessCredential> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
