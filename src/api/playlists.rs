use axum::{
    Form, Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};

use crate::{
    api::AppState,
    error::CreatePlaylistError,
    success,
    types::{NewPlaylistForm, PlaylistRecord},
    warning,
};

/// Lets a request through only with `Authorization: Bearer <ADMIN_TOKEN>`.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !constant_time_eq(token.as_bytes(), state.admin_token.as_bytes()) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

/// Compares every byte regardless of where the first mismatch is.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Creates a Spotify playlist and makes it the new default.
pub async fn add_playlist(
    State(state): State<AppState>,
    Form(form): Form<NewPlaylistForm>,
) -> Result<Json<PlaylistRecord>, (StatusCode, String)> {
    match state.resolver.create_default_playlist(&form.title).await {
        Ok(record) => {
            success!(
                "Playlist {} ({}) is the new default",
                record.id,
                record.remote_key
            );
            Ok(Json(record))
        }
        Err(CreatePlaylistError::EmptyTitle) => Err((
            StatusCode::BAD_REQUEST,
            CreatePlaylistError::EmptyTitle.to_string(),
        )),
        Err(e) => {
            warning!("Failed to create playlist {:?}: {}", form.title, e);
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

pub async fn list_playlists(State(state): State<AppState>) -> Json<Vec<PlaylistRecord>> {
    Json(state.resolver.registry().list().await)
}
