use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{NewTicket, NewUser, Ticket, User};
use super::store::{Store, StoreError};
use crate::auth::password::{hash_password, verify_password, BCRYPT_COST};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str = "id, email, password, username, is_staff, is_superuser";

/// `Store` backed by a Postgres connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let credential = hash_password(&user.password, BCRYPT_COST).await?;

        sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (email, password, username, is_staff, is_superuser) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&user.email)
        .bind(&credential)
        .bind(&user.username)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn user_exists(&self, email: &str, password: &str) -> Result<bool, StoreError> {
        let stored = sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match stored {
            Some(credential) => Ok(verify_password(password, &credential).await?),
            None => Ok(false),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_all_users(&self) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&query).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn create_ticket(&self, ticket: NewTicket) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO tickets (customer, topic, contents) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&ticket.customer)
        .bind(&ticket.topic)
        .bind(&ticket.contents)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn get_all_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT id, customer, topic, contents FROM tickets ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn is_unique_violation_code(code: &str) -> bool {
    code == UNIQUE_VIOLATION
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().is_some_and(|code| is_unique_violation_code(&code)) {
            let constraint = db.constraint().unwrap_or("unique constraint").to_string();
            tracing::debug!("Unique violation on {}", constraint);
            return StoreError::Conflict(format!("Duplicate value violates {}", constraint));
        }
    }
    StoreError::Database(err)
}
