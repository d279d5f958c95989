use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::utils::validate_email_format;
use crate::auth::{token_expiry, verify_credentials, Credentials};
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::server::AppState;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub expires_at: DateTime<Utc>,
}

/// POST /login - exchange credentials for a session token
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// On success the token is set as the `token` cookie, expiring together with
/// the token itself. Unknown credentials answer 404.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(creds) = payload
        .map_err(|_| ApiError::invalid_json("Email and password required to obtain a token."))?;

    if validate_email_format(&creds.email).is_err() || creds.password.is_empty() {
        return Err(ApiError::bad_request("Valid email address and password required."));
    }

    if !verify_credentials(state.store.as_ref(), &creds.email, &creds.password).await? {
        return Err(ApiError::not_found("User with specified credentials not found."));
    }

    let expires_at = token_expiry(Utc::now());
    let token = state.issuer.issue(&creds.email, expires_at)?;

    tracing::info!("Issued session token for '{}'", creds.email);

    Ok((
        [(SET_COOKIE, session_cookie(&token, expires_at))],
        ApiResponse::success(LoginResponse { expires_at }),
    ))
}

fn session_cookie(token: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "{}={}; Expires={}; Path=/; HttpOnly",
        SESSION_COOKIE,
        token,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}
