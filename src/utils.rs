use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the local playlist id from an inbound `to` header.
///
/// Accepts `12@host`, `Name <12@host>` and comma-separated lists, in which
/// case the first address counts. Returns `None` when there is no `@`.
pub fn playlist_id_from_address(to: &str) -> Option<String> {
    let first = first_recipient(to).trim();
    let address = match (first.rfind('<'), first.rfind('>')) {
        (Some(start), Some(end)) if start < end => &first[start + 1..end],
        _ => first,
    };

    let (local, _domain) = address.trim().split_once('@')?;
    Some(local.trim().to_string())
}

/// Cuts `to` at the first comma that separates recipients. Commas inside a
/// quoted display name or an angle-bracket address do not count.
fn first_recipient(to: &str) -> &str {
    let mut quoted = false;
    let mut bracketed = false;
    for (i, c) in to.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '<' if !quoted => bracketed = true,
            '>' if !quoted => bracketed = false,
            ',' if !quoted && !bracketed => return &to[..i],
            _ => {}
        }
    }
    to
}

/// Picks the search text of an email: the subject, or the body if the
/// subject is blank.
pub fn email_query<'a>(subject: &'a str, text: &'a str) -> &'a str {
    if subject.trim().is_empty() {
        text.trim()
    } else {
        subject.trim()
    }
}
