use std::env;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HMAC key used to sign and verify session tokens
    pub jwt_key: Secret,
    /// Shared secret that authorizes creating staff accounts
    pub staff_token: Secret,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// String value that never shows up in `Debug` output or logs
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Configuration value must not be empty: {0}")]
    Empty(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Presets are chosen from `APP_ENV`, then individual variables override
    /// them. `DATABASE_URL`, `JWT_KEY` and `STAFF_TOKEN` are required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let database_url = required(&lookup, "DATABASE_URL")?;
        let jwt_key = Secret::new(required(&lookup, "JWT_KEY")?);
        let staff_token = Secret::new(required(&lookup, "STAFF_TOKEN")?);

        let config = match environment {
            Environment::Production => Self::production(database_url, jwt_key, staff_token),
            Environment::Staging => Self::staging(database_url, jwt_key, staff_token),
            Environment::Development => Self::development(database_url, jwt_key, staff_token),
        };

        config.with_overrides(&lookup)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = parse(&v, "PORT")?;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse(&v, "DATABASE_MAX_CONNECTIONS")?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse(&v, "DATABASE_CONNECTION_TIMEOUT")?;
        }

        // API overrides
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = parse(&v, "API_ENABLE_REQUEST_LOGGING")?;
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = parse(&v, "SECURITY_ENABLE_CORS")?;
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    fn development(database_url: String, jwt_key: Secret, staff_token: Secret) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_key,
                staff_token,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging(database_url: String, jwt_key: Secret, staff_token: Secret) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: database_url,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_key,
                staff_token,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production(database_url: String, jwt_key: Secret, staff_token: Secret) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: database_url,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                enable_request_logging: false,
            },
            security: SecurityConfig {
                jwt_key,
                staff_token,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or(ConfigError::Missing(key))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Empty(key));
    }
    Ok(value)
}

fn parse<T: std::str::FromStr>(value: &str, key: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://helpdesk:pw@localhost:5432/helpdesk"),
        ("JWT_KEY", "signing-key"),
        ("STAFF_TOKEN", "staff-secret"),
    ];

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::from_lookup(lookup_from(BASE)).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.api.enable_request_logging);
        assert_eq!(config.security.jwt_key.expose(), "signing-key");
    }

    #[test]
    fn test_default_production_config() {
        let mut pairs = BASE.to_vec();
        pairs.push(("APP_ENV", "prod"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database.max_connections, 50);
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn env_overrides_win_over_presets() {
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("PORT", "8081"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]);
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(
            config.security.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn missing_or_empty_secrets_are_fatal() {
        let without_key: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != "JWT_KEY").collect();
        assert_eq!(
            AppConfig::from_lookup(lookup_from(&without_key)).unwrap_err(),
            ConfigError::Missing("JWT_KEY")
        );

        let mut blank_staff: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != "STAFF_TOKEN").collect();
        blank_staff.push(("STAFF_TOKEN", "   "));
        assert_eq!(
            AppConfig::from_lookup(lookup_from(&blank_staff)).unwrap_err(),
            ConfigError::Empty("STAFF_TOKEN")
        );
    }

    #[test]
    fn rejects_unparseable_port() {
        let mut pairs = BASE.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let config = AppConfig::from_lookup(lookup_from(BASE)).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("signing-key"));
        assert!(!rendered.contains("staff-secret"));
    }
}
