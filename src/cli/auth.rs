use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config, error, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let token_path = config::token_cache_path();
    match spotify::auth::auth(shared_state, token_path.clone()).await {
        Ok(()) => success!("Authentication successful! Token saved to {}", token_path.display()),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
