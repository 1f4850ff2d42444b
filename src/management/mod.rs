mod auth;
mod registry;

pub use auth::TokenManager;
pub use registry::PlaylistRegistry;
