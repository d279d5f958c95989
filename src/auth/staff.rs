use axum::http::HeaderMap;

use super::bearer::bearer_token;
use super::AuthError;
use crate::config::Secret;

/// Outcome of asking for staff status on a new account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffElevation {
    Granted,
    /// No `Authorization` header was sent
    Missing,
    /// Header present but not `Bearer <secret>`
    Malformed,
    /// Well-formed header carrying the wrong secret
    Denied,
}

impl StaffElevation {
    pub fn is_granted(self) -> bool {
        matches!(self, StaffElevation::Granted)
    }

    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            StaffElevation::Granted => Ok(()),
            StaffElevation::Missing => Err(AuthError::MissingHeader),
            StaffElevation::Malformed => Err(AuthError::WrongFormat),
            StaffElevation::Denied => Err(AuthError::InvalidToken),
        }
    }
}

/// Static shared-secret check for creating staff accounts.
///
/// Independent of session tokens: a caller proves knowledge of the staff
/// secret, not an identity.
#[derive(Debug, Clone)]
pub struct StaffGate {
    secret: Secret,
}

impl StaffGate {
    pub fn new(secret: Secret) -> Self {
        Self { secret }
    }

    pub fn check(&self, headers: &HeaderMap) -> StaffElevation {
        let presented = match bearer_token(headers) {
            Ok(token) => token,
            Err(AuthError::MissingHeader) => return StaffElevation::Missing,
            Err(_) => return StaffElevation::Malformed,
        };

        if !self.secret.is_empty()
            && constant_time_eq(presented.as_bytes(), self.secret.expose().as_bytes())
        {
            StaffElevation::Granted
        } else {
            StaffElevation::Denied
        }
    }
}

/// Compare two byte strings without short-circuiting on the first mismatch
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, HeaderValue};

    fn gate() -> StaffGate {
        StaffGate::new(Secret::new("let-me-in"))
    }

    fn with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn grants_exact_secret() {
        assert_eq!(gate().check(&with_auth("Bearer let-me-in")), StaffElevation::Granted);
        assert_eq!(gate().check(&with_auth("Bearer   let-me-in  ")), StaffElevation::Granted);
    }

    #[test]
    fn reports_each_failure_distinctly() {
        assert_eq!(gate().check(&HeaderMap::new()), StaffElevation::Missing);
        assert_eq!(gate().check(&with_auth("let-me-in")), StaffElevation::Malformed);
        assert_eq!(gate().check(&with_auth("Bearer let-me-out")), StaffElevation::Denied);
        assert_eq!(gate().check(&with_auth("Bearer let-me-in-please")), StaffElevation::Denied);
    }

    #[test]
    fn empty_secret_never_grants() {
        let gate = StaffGate::new(Secret::new(""));
        assert_eq!(gate.check(&with_auth("Bearer anything")), StaffElevation::Denied);
    }

    #[test]
    fn outcomes_map_to_auth_errors() {
        assert_eq!(StaffElevation::Granted.into_result(), Ok(()));
        assert_eq!(StaffElevation::Missing.into_result(), Err(AuthError::MissingHeader));
        assert_eq!(StaffElevation::Malformed.into_result(), Err(AuthError::WrongFormat));
        assert_eq!(StaffElevation::Denied.into_result(), Err(AuthError::InvalidToken));
    }

    #[test]
    fn constant_time_eq_checks_length() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
