use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{config, spotify::auth::TokenEndpoint, types::PkceToken, warning};

/// Redirect target of the PKCE flow started by `playlist-inbox auth`.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    let (endpoint, redirect_uri) = match (TokenEndpoint::from_env(), config::spotify_redirect_uri())
    {
        (Ok(endpoint), Ok(uri)) => (endpoint, uri),
        (Err(e), _) | (_, Err(e)) => {
            warning!("Token exchange not configured: {}", e);
            return Html("<h4>Login failed.</h4>");
        }
    };

    match endpoint
        .exchange_code(&Client::new(), code, &pkce_state.code_verifier, &redirect_uri)
        .await
    {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
