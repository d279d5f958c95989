use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Helpdesk API",
            "version": version,
            "endpoints": {
                "tickets": "GET, POST /tickets (public)",
                "users": "POST /users (public, staff needs secret), GET /users (token, staff only)",
                "login": "POST /login (public - token acquisition)",
                "ping": "/ping",
                "health": "/health",
            }
        }
    }))
}

/// GET /ping - current server time
pub async fn ping() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// GET /health - storage liveness; 503 when the store cannot be reached
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable.")
    })?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
