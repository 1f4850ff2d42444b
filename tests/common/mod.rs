#![allow(dead_code)]

use std::sync::Arc;

use playlist_inbox::{
    api::{AppState, ReplySettings},
    mailer::Mailer,
    management::PlaylistRegistry,
    resolver::MessageResolver,
    spotify::{AccountSession, CatalogClient, TokenStore, auth::TokenEndpoint},
    types::AccessCredential,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::MockServer;

pub const ADMIN_TOKEN: &str = "admin-secret";

pub fn credential(access_token: &str) -> AccessCredential {
    AccessCredential {
        access_token: access_token.to_string(),
        refresh_token: "refresh-1".to_string(),
        scope: "playlist-modify-public".to_string(),
        expires_in: 3600,
        obtained_at: 0,
    }
}

/// Session whose token endpoint lives on `server` at `/api/token`.
pub fn session(server: &MockServer, access_token: &str) -> AccountSession {
    let endpoint = TokenEndpoint::new(format!("{}/api/token", server.uri()), "client-id");
    AccountSession::new("owner", TokenStore::new(endpoint, credential(access_token)))
}

pub async fn registry(dir: &TempDir) -> PlaylistRegistry {
    PlaylistRegistry::open(dir.path().join("playlists.json"))
        .await
        .unwrap()
}

pub fn resolver(
    server: &MockServer,
    registry: PlaylistRegistry,
    access_token: &str,
) -> MessageResolver {
    MessageResolver::new(
        Arc::new(registry),
        Arc::new(CatalogClient::new(server.uri())),
        Arc::new(session(server, access_token)),
    )
}

pub fn app_state(server: &MockServer, resolver: MessageResolver) -> AppState {
    AppState::new(
        Arc::new(resolver),
        Arc::new(Mailer::new(server.uri(), "sendgrid-key")),
        ReplySettings {
            from_name: "Playlist Inbox".to_string(),
            reply_to: "support@example.com".to_string(),
        },
        ADMIN_TOKEN,
    )
}

pub fn search_hit(name: &str, artist: &str) -> Value {
    json!({
        "tracks": {
            "items": [{
                "id": "t1",
                "name": name,
                "uri": "spotify:track:t1",
                "artists": [{ "id": "a1", "name": artist }]
            }],
            "total": 1
        }
    })
}

pub fn search_miss() -> Value {
    json!({ "tracks": { "items": [], "total": 0 } })
}

pub fn playlist_details(name: &str, url: &str) -> Value {
    json!({ "name": name, "external_urls": { "spotify": url } })
}

/// `application/x-www-form-urlencoded` body from key/value pairs.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

pub const BOUNDARY: &str = "xYzZY";

/// `multipart/form-data` body as SendGrid's parse webhook sends it.
pub fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body
}
