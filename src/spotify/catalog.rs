use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config,
    error::{ApiError, AuthError, CatalogError, ConfigError},
    spotify::session::AccountSession,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, PlaylistDetails, PlaylistSnapshot, SearchResponse, TrackResult,
    },
};

/// One Web API request, kept as data so it can be sent again after a refresh.
#[derive(Debug, Clone)]
pub struct ApiCall {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiCall {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }
}

/// Spotify Web API client for search and playlist changes.
pub struct CatalogClient {
    base_url: String,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(config::spotify_apiurl()?))
    }

    async fn send(&self, call: &ApiCall, token: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}/{}", self.base_url, call.path.trim_start_matches('/'));
        let mut request = self
            .client
            .request(call.method.clone(), url)
            .bearer_auth(token)
            .query(&call.query);
        if let Some(body) = &call.body {
            request = request.json(body);
        }
        request.send().await
    }

    /// Sends `call` as the session's account.
    ///
    /// A 401 triggers exactly one token refresh and one retry. A second 401
    /// is an [`AuthError::StillUnauthorized`]; any other failing status is a
    /// [`CatalogError`] and is never retried.
    pub async fn authenticated_call(
        &self,
        session: &AccountSession,
        call: &ApiCall,
    ) -> Result<Response, ApiError> {
        let credential = session.tokens().current_credential().await;
        let res = self.send(call, &credential.access_token).await?;
        if res.status() != StatusCode::UNAUTHORIZED {
            return ensure_success(res).await;
        }

        let fresh = session.tokens().refresh(&credential).await?;
        let res = self.send(call, &fresh.access_token).await?;
        if res.status() == StatusCode::UNAUTHORIZED {
            return Err(AuthError::StillUnauthorized.into());
        }

        ensure_success(res).await
    }

    /// First track matching `query`, or `None` when the catalog has nothing.
    pub async fn search(
        &self,
        session: &AccountSession,
        query: &str,
    ) -> Result<Option<TrackResult>, ApiError> {
        let call = ApiCall::get("search")
            .query("q", query)
            .query("type", "track")
            .query("limit", "1");

        let res = self.authenticated_call(session, &call).await?;
        let payload: SearchResponse = decode(res).await?;

        Ok(payload.tracks.items.into_iter().next().map(TrackResult::from))
    }

    /// Appends a track to a playlist and reports the playlist's name and link.
    pub async fn add_track(
        &self,
        session: &AccountSession,
        playlist_key: &str,
        track_key: &str,
    ) -> Result<PlaylistSnapshot, ApiError> {
        let body = serde_json::to_value(AddTrackToPlaylistRequest {
            uris: vec![track_key.to_string()],
        })
        .map_err(|e| CatalogError::Payload(e.to_string()))?;

        let call = ApiCall::post(format!("playlists/{}/tracks", playlist_key), body);
        let res = self.authenticated_call(session, &call).await?;
        let _: AddTrackToPlaylistResponse = decode(res).await?;

        let call = ApiCall::get(format!("playlists/{}", playlist_key))
            .query("fields", "name,external_urls");
        let res = self.authenticated_call(session, &call).await?;
        let details: PlaylistDetails = decode(res).await?;

        Ok(details.into())
    }

    /// Creates a playlist owned by the session's account and returns its id.
    pub async fn create_playlist(
        &self,
        session: &AccountSession,
        title: &str,
    ) -> Result<String, ApiError> {
        let body = serde_json::to_value(CreatePlaylistRequest {
            name: title.to_string(),
            description: String::new(),
            public: true,
        })
        .map_err(|e| CatalogError::Payload(e.to_string()))?;

        let call = ApiCall::post(format!("users/{}/playlists", session.account_id()), body);
        let res = self.authenticated_call(session, &call).await?;
        let created: CreatePlaylistResponse = decode(res).await?;

        Ok(created.id)
    }
}

async fn ensure_success(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(CatalogError::Status { status, body }.into())
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    res.json::<T>()
        .await
        .map_err(|e| CatalogError::Payload(e.to_string()).into())
}
