//! Handlers behind `jwt_auth_middleware`.
//!
//! Each receives an `AuthenticatedRequest` and applies its own role checks.

pub mod users;

pub use users::users_list;
