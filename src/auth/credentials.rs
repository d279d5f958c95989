use serde::Deserialize;

use crate::database::{Store, StoreError};

/// Login input; missing fields decode as empty strings and fail validation
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Check an email/password pair against stored accounts.
///
/// `Ok(false)` means no account matched. Only storage failures are errors.
pub async fn verify_credentials(
    store: &dyn Store,
    email: &str,
    password: &str,
) -> Result<bool, StoreError> {
    let matched = store.user_exists(email, password).await?;
    if !matched {
        tracing::debug!("No account matched credentials for {}", email);
    }
    Ok(matched)
}
