//! Confirmation texts sent back to whoever asked for the track.

use crate::types::{PlaylistSnapshot, TrackResult};

pub const DEVELOPER_URL: &str = "https://developer.spotify.com/";

/// Long confirmation used for email replies.
pub fn email_body(playlist: &PlaylistSnapshot, track: &TrackResult) -> String {
    format!(
        "\"{}\" by \"{}\" added to \"{}\". Listen here: {}\n\nGet started with the Spotify Web API at {}",
        track.name, track.artist, playlist.name, playlist.short_url, DEVELOPER_URL
    )
}

/// Short confirmation used for SMS replies.
pub fn sms_body(playlist: &PlaylistSnapshot, track: &TrackResult) -> String {
    format!(
        "\"{}\" by \"{}\" added to {}\n\nBuild your own app: {}",
        track.name, track.artist, playlist.short_url, DEVELOPER_URL
    )
}

pub fn email_subject(original_subject: &str) -> String {
    format!("Re: {}", original_subject)
}

/// Wraps an SMS body in the TwiML document Twilio expects back.
///
/// `None` yields an empty response, which Twilio takes as "no reply".
pub fn twiml(message: Option<&str>) -> String {
    match message {
        Some(body) => format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
            escape_xml(body)
        ),
        None => "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response/>".to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

