use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// OAuth2 credential of the single configured Spotify account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessCredential {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<AccessCredential>,
}

/// Raw answer of the token endpoint, for both code exchange and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<i64>,
}

/// First match of a catalog search. `key` is the track URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackResult {
    pub key: String,
    pub name: String,
    pub artist: String,
}

/// What the catalog tells us about a playlist after it was changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    pub name: String,
    pub short_url: String,
}

/// Local playlist row. At most one record has `is_default` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub id: u64,
    pub remote_key: String,
    pub is_default: bool,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: u64,
    pub remote_key: String,
    pub default: String,
}

impl From<&PlaylistRecord> for PlaylistTableRow {
    fn from(record: &PlaylistRecord) -> Self {
        Self {
            id: record.id,
            remote_key: record.remote_key.clone(),
            default: if record.is_default { "yes" } else { "" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

impl From<Track> for TrackResult {
    fn from(track: Track) -> Self {
        let artist = track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            key: track.uri,
            name: track.name,
            artist,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetails {
    pub name: String,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

impl From<PlaylistDetails> for PlaylistSnapshot {
    fn from(details: PlaylistDetails) -> Self {
        Self {
            name: details.name,
            short_url: details.external_urls.spotify,
        }
    }
}

/// Form posted by SendGrid's inbound parse webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEmail {
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub envelope: String,
}

/// Routing part of the SendGrid envelope. `to` arrives as a list.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub from: String,
    #[serde(default)]
    pub to: EnvelopeTo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeTo {
    One(String),
    Many(Vec<String>),
}

impl Default for EnvelopeTo {
    fn default() -> Self {
        EnvelopeTo::Many(Vec::new())
    }
}

impl EnvelopeTo {
    pub fn first(&self) -> Option<&str> {
        match self {
            EnvelopeTo::One(addr) => Some(addr.as_str()),
            EnvelopeTo::Many(addrs) => addrs.first().map(String::as_str),
        }
    }
}

/// Form posted by Twilio for an incoming SMS.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundSms {
    #[serde(rename = "Body", default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlaylistForm {
    #[serde(default)]
    pub title: String,
}

/// Outgoing email, independent of the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailReply {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub from_email: String,
    pub from_name: String,
    pub reply_to: String,
}
