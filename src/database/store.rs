use async_trait::async_trait;
use thiserror::Error;

use super::models::{NewTicket, NewUser, Ticket, User};
use crate::auth::password::PasswordError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique column (user email) already holds this value
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Credential(#[from] PasswordError),
}

/// Persistence for users and tickets.
///
/// Implementations own password hashing: `create_user` receives the plaintext
/// password and `user_exists` checks a plaintext password against what was
/// stored.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user and return its id; duplicate email is `StoreError::Conflict`
    async fn create_user(&self, user: NewUser) -> Result<i64, StoreError>;

    /// Whether a user with this email and password exists
    async fn user_exists(&self, email: &str, password: &str) -> Result<bool, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn get_all_users(&self) -> Result<Vec<User>, StoreError>;

    async fn create_ticket(&self, ticket: NewTicket) -> Result<i64, StoreError>;

    /// All tickets, oldest first
    async fn get_all_tickets(&self) -> Result<Vec<Ticket>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
