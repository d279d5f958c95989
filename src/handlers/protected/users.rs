use axum::extract::State;

use crate::auth::AuthError;
use crate::database::User;
use crate::middleware::{ApiResponse, ApiResult, AuthenticatedRequest};
use crate::server::AppState;

/// GET /users - list all accounts; staff and superusers only
pub async fn users_list(
    State(state): State<AppState>,
    auth: AuthenticatedRequest,
) -> ApiResult<Vec<User>> {
    if !auth.user.is_privileged() {
        tracing::warn!("User '{}' lacks permission for {} {}", auth.user.email, auth.method, auth.uri.path());
        return Err(AuthError::NoPermission.into());
    }

    let users = state.store.get_all_users().await?;
    Ok(ApiResponse::success(users))
}
