use reqwest::Client;
use serde_json::json;

use crate::{
    config,
    error::{ConfigError, MailError},
    types::EmailReply,
};

/// Sends plain-text replies through SendGrid's v3 mail API.
pub struct Mailer {
    api_url: String,
    api_key: String,
    client: Client,
}

impl Mailer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(config::sendgrid_api_url(), config::sendgrid_api_key()?))
    }

    pub async fn send(&self, reply: &EmailReply) -> Result<(), MailError> {
        let payload = json!({
            "personalizations": [{
                "to": [{ "email": reply.to }],
                "subject": reply.subject,
            }],
            "from": { "email": reply.from_email, "name": reply.from_name },
            "reply_to": { "email": reply.reply_to },
            "content": [{ "type": "text/plain", "value": reply.body }],
        });

        let res = self
            .client
            .post(format!("{}/mail/send", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(MailError::Status { status, body });
        }

        Ok(())
    }
}
