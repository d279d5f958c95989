//! HTTP handlers in two tiers.
//!
//! `public` handlers need no session token. `protected` handlers sit behind
//! `jwt_auth_middleware` and apply their own role checks.

use serde::Serialize;

use crate::error::ApiError;

pub mod public;
pub mod protected;

/// Body of every create endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatedId {
    pub id: i64,
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
