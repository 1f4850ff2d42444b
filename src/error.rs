//! Error taxonomy for the resolution pipeline.
//!
//! "Nothing matched" (unknown playlist, empty search) is not an error and is
//! modelled as `Option::None` by the callers. Everything here is a real
//! failure that aborts the current message only.

use reqwest::StatusCode;
use thiserror::Error;

/// The identity provider refused to mint a new access token, or the catalog
/// kept rejecting the credential after a refresh.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint answered {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("token response did not contain an access_token")]
    MissingAccessToken,

    #[error("access token still rejected after refresh")]
    StillUnauthorized,

    #[error("token endpoint request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Any non-authorization failure talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog API answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("catalog API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected catalog API payload: {0}")]
    Payload(String),
}

/// Failure of an authenticated catalog call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Catalog(CatalogError::Http(err))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("no default playlist configured")]
    NoDefaultPlaylist,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("playlist store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("playlist store is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Outbound email could not be handed to SendGrid.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail API answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("mail API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum CreatePlaylistError {
    #[error("playlist title must not be empty")]
    EmptyTitle,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
