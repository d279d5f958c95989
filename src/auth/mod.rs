//! Authentication and authorization primitives.
//!
//! Session tokens are HS256 JWTs carrying the caller's email and an absolute
//! expiry. They are issued by [`TokenIssuer`] after [`verify_credentials`]
//! succeeds and checked on every protected request by [`TokenValidator`].
//! Creating a staff account goes through the separate [`StaffGate`], which
//! compares a bearer value against a static shared secret.

use thiserror::Error;

pub mod bearer;
pub mod credentials;
pub mod password;
pub mod staff;
pub mod token;

pub use bearer::bearer_token;
pub use credentials::{verify_credentials, Credentials};
pub use staff::{StaffElevation, StaffGate};
pub use token::{token_expiry, Claims, TokenError, TokenIssuer, TokenValidator, TOKEN_TTL_MINUTES};

/// Why a request was refused by the authentication layer.
///
/// Display strings are sent to clients as-is, so they stay coarse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Token missing.")]
    MissingHeader,

    #[error("Token of wrong format.")]
    WrongFormat,

    #[error("Token invalid.")]
    InvalidToken,

    // Same text as InvalidToken: callers cannot tell a forged token from a
    // token for a removed account.
    #[error("Token invalid.")]
    UnknownUser,

    #[error("No permissions to perform this action.")]
    NoPermission,
}
