use std::sync::Arc;

use crate::{mailer::Mailer, resolver::MessageResolver};

/// Sender details stamped on every email reply.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    pub from_name: String,
    pub reply_to: String,
}

/// Shared state of the inbound service.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<MessageResolver>,
    pub mailer: Arc<Mailer>,
    pub replies: ReplySettings,
    pub admin_token: Arc<str>,
}

impl AppState {
    pub fn new(
        resolver: Arc<MessageResolver>,
        mailer: Arc<Mailer>,
        replies: ReplySettings,
        admin_token: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            resolver,
            mailer,
            replies,
            admin_token: admin_token.into(),
        }
    }
}
