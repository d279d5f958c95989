use serde::Serialize;
use sqlx::FromRow;

#[derive(Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Salted password digest; never serialized
    #[serde(skip)]
    pub password: String,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl User {
    /// Staff and superusers may see other accounts
    pub fn is_privileged(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .finish_non_exhaustive()
    }
}

/// Account to be inserted; `password` is plaintext and hashed by the store
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}
