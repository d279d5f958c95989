#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::header::SET_COOKIE;
use serde_json::{json, Value};

use helpdesk_api::config::{Secret, SecurityConfig};
use helpdesk_api::testing::MemoryStore;
use helpdesk_api::{app, AppState};

pub const JWT_KEY: &str = "integration-signing-key";
pub const STAFF_TOKEN: &str = "integration-staff-secret";

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the full router over an in-memory store on a free local port
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryStore::new());
        let security = SecurityConfig {
            jwt_key: Secret::new(JWT_KEY),
            staff_token: Secret::new(STAFF_TOKEN),
            enable_cors: false,
            cors_origins: vec![],
        };
        let state = AppState::new(store.clone(), &security);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        Ok(Self {
            base_url,
            store,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_user(&self, body: Value) -> Result<reqwest::Response> {
        Ok(self.client.post(self.url("/users")).json(&body).send().await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Log in and return the session token from the `token` cookie
    pub async fn session_token(&self, email: &str, password: &str) -> Result<String> {
        let res = self.login(email, password).await?;
        anyhow::ensure!(res.status().is_success(), "login failed with {}", res.status());
        cookie_value(&res, "token").context("login response has no token cookie")
    }

    pub async fn list_users(&self, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url("/users"))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

/// Full `Set-Cookie` header for cookie `name`
pub fn set_cookie_header(res: &reqwest::Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    res.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix))
        .map(str::to_string)
}

/// Value of cookie `name` from the response's `Set-Cookie` headers
pub fn cookie_value(res: &reqwest::Response, name: &str) -> Option<String> {
    let header = set_cookie_header(res, name)?;
    let pair = header.split(';').next()?;
    pair.strip_prefix(&format!("{}=", name)).map(str::to_string)
}
