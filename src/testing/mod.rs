//! In-process `Store` doubles used by unit and integration tests.
//!
//! [`MemoryStore`] behaves like the Postgres store: ids start at 1 and
//! increase, emails are unique and case sensitive, passwords are kept as
//! bcrypt hashes. [`FailingStore`] fails every call like a lost database.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::password::{hash_password, verify_password};
use crate::database::{NewTicket, NewUser, Store, StoreError, Ticket, User};

/// Lowest cost bcrypt accepts; keeps test logins fast
pub const TEST_BCRYPT_COST: u32 = 4;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tickets: RwLock<Vec<Ticket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, bypassing the HTTP staff gate.
    ///
    /// Returns the new id. Panics on duplicate email.
    pub async fn seed_user(&self, email: &str, password: &str, is_staff: bool, is_superuser: bool) -> i64 {
        self.create_user(NewUser {
            email: email.to_string(),
            password: password.to_string(),
            username: email.split('@').next().unwrap_or(email).to_string(),
            is_staff,
            is_superuser,
        })
        .await
        .expect("seed user email must be unique")
    }

    /// Drop an account, as if removed behind the API's back
    pub async fn remove_user(&self, email: &str) {
        self.users.write().await.retain(|u| u.email != email);
    }

    /// Stored credential for `email`, as written by `create_user`
    pub async fn stored_password(&self, email: &str) -> Option<String> {
        let users = self.users.read().await;
        users.iter().find(|u| u.email == email).map(|u| u.password.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let credential = hash_password(&user.password, TEST_BCRYPT_COST).await?;

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("Duplicate value violates users_email_key".to_string()));
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(User {
            id,
            email: user.email,
            password: credential,
            username: user.username,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        });
        Ok(id)
    }

    async fn user_exists(&self, email: &str, password: &str) -> Result<bool, StoreError> {
        match self.stored_password(email).await {
            Some(credential) => Ok(verify_password(password, &credential).await?),
            None => Ok(false),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn create_ticket(&self, ticket: NewTicket) -> Result<i64, StoreError> {
        let mut tickets = self.tickets.write().await;
        let id = tickets.len() as i64 + 1;
        tickets.push(Ticket {
            id,
            customer: ticket.customer,
            topic: ticket.topic,
            contents: ticket.contents,
        });
        Ok(id)
    }

    async fn get_all_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        Ok(self.tickets.read().await.clone())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Driver text carried by every [`FailingStore`] error
pub const OUTAGE_DETAIL: &str = "connection to server at 10.0.0.5:5432 refused";

/// Store whose every operation fails with a database error
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl FailingStore {
    fn outage() -> StoreError {
        StoreError::Database(sqlx::Error::Protocol(OUTAGE_DETAIL.to_string()))
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn create_user(&self, _user: NewUser) -> Result<i64, StoreError> {
        Err(Self::outage())
    }

    async fn user_exists(&self, _email: &str, _password: &str) -> Result<bool, StoreError> {
        Err(Self::outage())
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(Self::outage())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, StoreError> {
        Err(Self::outage())
    }

    async fn create_ticket(&self, _ticket: NewTicket) -> Result<i64, StoreError> {
        Err(Self::outage())
    }

    async fn get_all_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        Err(Self::outage())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(Self::outage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "password1".to_string(),
            username: "someone".to_string(),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        assert_eq!(store.create_user(new_user("a@b.com")).await.unwrap(), 1);
        assert!(matches!(
            store.create_user(new_user("a@b.com")).await,
            Err(StoreError::Conflict(_))
        ));
        assert_eq!(store.create_user(new_user("c@d.com")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn tickets_keep_insertion_order() {
        let store = MemoryStore::new();
        for topic in ["first", "second"] {
            store
                .create_ticket(NewTicket {
                    customer: "c".into(),
                    topic: topic.into(),
                    contents: "x".into(),
                })
                .await
                .unwrap();
        }
        let topics: Vec<_> = store
            .get_all_tickets()
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.id, t.topic))
            .collect();
        assert_eq!(topics, vec![(1, "first".to_string()), (2, "second".to_string())]);
    }

    #[tokio::test]
    async fn passwords_are_stored_as_bcrypt_hashes() {
        let store = MemoryStore::new();
        store.seed_user("a@b.com", "password1", false, false).await;

        let stored = store.stored_password("a@b.com").await.unwrap();
        assert!(stored.starts_with("$2b$04$"), "unexpected credential {}", stored);
        assert!(bcrypt::verify("password1", &stored).unwrap());
        assert!(store.user_exists("a@b.com", "password1").await.unwrap());
        assert!(!store.user_exists("a@b.com", "password2").await.unwrap());
    }

    #[tokio::test]
    async fn failing_store_reports_database_errors() {
        assert!(matches!(FailingStore.health_check().await, Err(StoreError::Database(_))));
        assert!(matches!(FailingStore.get_all_tickets().await, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn removed_users_are_not_found() {
        let store = MemoryStore::new();
        store.seed_user("a@b.com", "password1", false, false).await;
        store.remove_user("a@b.com").await;
        assert!(store.find_user_by_email("a@b.com").await.unwrap().is_none());
    }
}
