use std::sync::Arc;

use anyhow::Context;
use axum::{
    handler::Handler,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{StaffGate, TokenIssuer, TokenValidator};
use crate::config::{AppConfig, SecurityConfig};
use crate::database::Store;
use crate::handlers::{method_not_allowed, protected, public};
use crate::middleware::jwt_auth_middleware;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
    pub staff_gate: Arc<StaffGate>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, security: &SecurityConfig) -> Self {
        Self {
            store,
            issuer: Arc::new(TokenIssuer::new(&security.jwt_key)),
            validator: Arc::new(TokenValidator::new(&security.jwt_key)),
            staff_gate: Arc::new(StaffGate::new(security.staff_token.clone())),
        }
    }
}

/// All routes, without transport layers
pub fn app(state: AppState) -> Router {
    let require_token = from_fn_with_state(state.clone(), jwt_auth_middleware);

    Router::new()
        // Service probes
        .route("/", get(public::root))
        .route("/ping", get(public::ping))
        .route("/health", get(public::health))
        // Tickets are public
        .route(
            "/tickets",
            get(public::tickets_list)
                .post(public::ticket_create)
                .fallback(method_not_allowed),
        )
        // Listing users needs a session token; creating one does not
        .route(
            "/users",
            get(protected::users_list.layer(require_token))
                .post(public::user_create)
                .fallback(method_not_allowed),
        )
        .route("/login", post(public::login).fallback(method_not_allowed))
        .with_state(state)
}

/// Routes plus CORS and request tracing as configured
pub fn router(config: &AppConfig, state: AppState) -> Router {
    let mut router = app(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Bind and serve until ctrl-c
pub async fn serve(config: &AppConfig, state: AppState) -> anyhow::Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Helpdesk API listening on http://{}", bind_addr);

    axum::serve(listener, router(config, state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
