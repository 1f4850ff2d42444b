use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router, middleware,
    routing::{get, post},
};
use tokio::sync::Mutex;

use crate::{
    Res,
    api::{self, AppState},
    info,
    types::PkceToken,
};

/// Routes of the inbound service.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/add-playlist", post(api::add_playlist))
        .route("/playlists", get(api::list_playlists))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_admin,
        ));

    Router::new()
        .route("/health", get(api::health))
        .route("/sendgrid", post(api::sendgrid_add))
        .route("/twilio", post(api::twilio_add))
        .merge(admin)
        .with_state(state)
}

pub async fn start_service(addr: &str, state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Short-lived server that receives the OAuth redirect during `auth`.
pub async fn start_auth_server(addr: &str, state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
