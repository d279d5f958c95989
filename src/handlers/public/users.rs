use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use super::utils::validate_email_format;
use crate::auth::password::MIN_PASSWORD_LENGTH;
use crate::database::{NewUser, StoreError};
use crate::error::ApiError;
use crate::handlers::CreatedId;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRequest {
    pub is_staff: bool,
    pub is_superuser: bool,
    pub email: String,
    pub password: String,
    pub username: String,
}

/// POST /users - create an account
///
/// Expected Input:
/// ```json
/// {
///   "email": "string",      // Required: valid address, unique
///   "password": "string",   // Required: at least 8 characters
///   "username": "string",   // Required
///   "isStaff": false        // Optional: needs `Authorization: Bearer <staff secret>`
/// }
/// ```
///
/// A staff request that fails the staff secret check is refused; it is never
/// downgraded to a regular account. `isSuperuser` cannot be set through the API.
pub async fn user_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<CreatedId> {
    let Json(user) = payload?;

    if validate_email_format(&user.email).is_err() || user.password.is_empty() || user.username.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Username, password and valid email address required.",
        ));
    }

    if user.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "Password min length is {}",
            MIN_PASSWORD_LENGTH
        )));
    }

    if user.is_superuser {
        tracing::warn!("Ignoring isSuperuser on account request for '{}'", user.email);
    }

    if user.is_staff {
        let elevation = state.staff_gate.check(&headers);
        if !elevation.is_granted() {
            tracing::warn!("Staff account request for '{}' refused: {:?}", user.email, elevation);
        }
        elevation.into_result()?;
    }

    let created = state
        .store
        .create_user(NewUser {
            email: user.email.clone(),
            password: user.password,
            username: user.username,
            is_staff: user.is_staff,
            is_superuser: false,
        })
        .await;

    let id = match created {
        Ok(id) => id,
        Err(StoreError::Conflict(_)) => {
            return Err(ApiError::already_exists("User with specified email already exists."));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Created user {} ('{}', staff: {})", id, user.email, user.is_staff);
    Ok(ApiResponse::created(CreatedId { id }))
}
