use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, State, rejection::FormRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::{Map, Value};

use crate::{
    api::AppState,
    reply, success,
    types::{EmailReply, Envelope, InboundEmail, InboundSms},
    utils, warning,
};

/// SendGrid inbound parse webhook.
///
/// Always answers 200 so SendGrid neither retries nor bounces; everything
/// that goes wrong is only logged.
pub async fn sendgrid_add(State(state): State<AppState>, request: Request) -> StatusCode {
    let email = match inbound_email(request).await {
        Ok(email) => email,
        Err(e) => {
            warning!("Rejected inbound email payload: {}", e);
            return StatusCode::OK;
        }
    };

    let Some(playlist_id) = utils::playlist_id_from_address(&email.to) else {
        warning!("No playlist address in recipient {:?}", email.to);
        return StatusCode::OK;
    };
    let query = utils::email_query(&email.subject, &email.text);

    let (playlist, track) = match state.resolver.resolve(&playlist_id, query).await {
        Ok(Some(found)) => found,
        Ok(None) => return StatusCode::OK,
        Err(e) => {
            warning!("Failed to add {:?} to playlist {}: {}", query, playlist_id, e);
            return StatusCode::OK;
        }
    };
    success!("Added {} by {} to {}", track.name, track.artist, playlist.name);

    let envelope: Envelope = match serde_json::from_str(&email.envelope) {
        Ok(envelope) => envelope,
        Err(e) => {
            warning!("Malformed envelope, no reply sent: {}", e);
            return StatusCode::OK;
        }
    };
    let Some(from_email) = envelope.to.first() else {
        warning!("Envelope has no recipient, no reply sent");
        return StatusCode::OK;
    };

    let message = EmailReply {
        to: envelope.from.clone(),
        subject: reply::email_subject(&email.subject),
        body: reply::email_body(&playlist, &track),
        from_email: from_email.to_string(),
        from_name: state.replies.from_name.clone(),
        reply_to: state.replies.reply_to.clone(),
    };

    if let Err(e) = state.mailer.send(&message).await {
        warning!("Failed to send reply to {}: {}", message.to, e);
    }

    StatusCode::OK
}

/// Reads the parse webhook payload, which SendGrid posts as
/// `multipart/form-data`. Url-encoded bodies are accepted as well.
async fn inbound_email(request: Request) -> Result<InboundEmail, String> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        let Form(email) = Form::<InboundEmail>::from_request(request, &())
            .await
            .map_err(|e| e.to_string())?;
        return Ok(email);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| e.to_string())?;

    let mut fields = Map::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        // attachments are not needed to resolve a track
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(|e| e.to_string())?;
        fields.insert(name, Value::String(value));
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())
}

/// Twilio incoming SMS webhook. Tracks always go to the default playlist.
pub async fn twilio_add(
    State(state): State<AppState>,
    form: Result<Form<InboundSms>, FormRejection>,
) -> impl IntoResponse {
    let message = match form {
        Ok(Form(sms)) => sms_reply(&state, &sms.body).await,
        Err(e) => {
            warning!("Rejected inbound SMS payload: {}", e);
            None
        }
    };

    (
        [(header::CONTENT_TYPE, "text/xml")],
        reply::twiml(message.as_deref()),
    )
}

async fn sms_reply(state: &AppState, query: &str) -> Option<String> {
    let playlist = match state.resolver.registry().default_playlist().await {
        Ok(playlist) => playlist,
        Err(e) => {
            warning!("Cannot handle SMS: {}", e);
            return None;
        }
    };

    match state
        .resolver
        .resolve(&playlist.id.to_string(), query)
        .await
    {
        Ok(Some((snapshot, track))) => {
            success!("Added {} by {} to {}", track.name, track.artist, snapshot.name);
            Some(reply::sms_body(&snapshot, &track))
        }
        Ok(None) => None,
        Err(e) => {
            warning!("Failed to add {:?} to playlist {}: {}", query, playlist.id, e);
            None
        }
    }
}
