use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};

use crate::auth::{bearer_token, AuthError};
use crate::database::User;
use crate::error::ApiError;
use crate::server::AppState;

/// Account resolved from a verified session token, stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

/// Inbound request as seen by a handler behind [`jwt_auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthenticatedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub user: User,
}

/// JWT authentication middleware.
///
/// Every request is checked from scratch: bearer header, signature, expiry,
/// then the email from the claims must still belong to a stored account.
/// Role checks are left to the wrapped handler.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = bearer_token(request.headers()).map_err(|err| {
            tracing::debug!("Rejected {} {}: {:?}", request.method(), request.uri().path(), err);
            err
        })?;

        state.validator.validate(token).map_err(|err| {
            tracing::warn!("Rejected session token on {}: {}", request.uri().path(), err);
            err
        })?
    };

    let user = state
        .store
        .find_user_by_email(&claims.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Session token for unknown account '{}'", claims.email);
            AuthError::UnknownUser
        })?;

    tracing::debug!("Authenticated {} (id {})", user.email, user.id);
    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("{} reached a protected handler without authentication", parts.uri.path());
                ApiError::from(AuthError::MissingHeader)
            })?;

        Ok(Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            user,
        })
    }
}
