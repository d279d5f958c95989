use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::AuthError;

const SCHEME: &str = "Bearer";

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Whitespace around the token is ignored, but the scheme word must be present
/// and followed by exactly one token segment.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
    let value = value.to_str().map_err(|_| AuthError::WrongFormat)?;

    if value.trim().is_empty() {
        return Err(AuthError::MissingHeader);
    }

    parse_bearer(value)
}

fn parse_bearer(value: &str) -> Result<&str, AuthError> {
    let rest = value
        .trim_start()
        .strip_prefix(SCHEME)
        .ok_or(AuthError::WrongFormat)?;

    // "Bearerabc" is a different scheme, not a token
    if !rest.starts_with(char::is_whitespace) {
        return Err(AuthError::WrongFormat);
    }

    let token = rest.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::WrongFormat);
    }

    Ok(token)
}
