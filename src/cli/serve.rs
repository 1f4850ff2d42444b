use std::sync::Arc;

use crate::{
    Res,
    api::{AppState, ReplySettings},
    config, error, info,
    mailer::Mailer,
    management::PlaylistRegistry,
    resolver::MessageResolver,
    server,
    spotify::{AccountSession, CatalogClient},
};

/// Wires registry, catalog client and account session from configuration.
pub async fn resolver_from_env() -> Res<MessageResolver> {
    let store_path = config::playlist_store_path();
    let registry = PlaylistRegistry::open(&store_path).await?;
    info!("Playlist store: {}", store_path.display());

    let catalog = CatalogClient::from_env()?;
    let session = AccountSession::from_env(config::token_cache_path()).await?;

    Ok(MessageResolver::new(
        Arc::new(registry),
        Arc::new(catalog),
        Arc::new(session),
    ))
}

async fn app_state_from_env() -> Res<AppState> {
    let resolver = resolver_from_env().await?;
    let replies = ReplySettings {
        from_name: config::reply_from_name(),
        reply_to: config::reply_to_address()?,
    };

    Ok(AppState::new(
        Arc::new(resolver),
        Arc::new(Mailer::from_env()?),
        replies,
        config::admin_token()?,
    ))
}

pub async fn serve() {
    let state = match app_state_from_env().await {
        Ok(state) => state,
        Err(e) => error!("Cannot start service: {}", e),
    };

    let addr = match config::server_addr() {
        Ok(addr) => addr,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = server::start_service(&addr, state).await {
        error!("Server stopped: {}", e);
    }
}
