use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skz-api"
    }))
}

/// Health plus a database round-trip
pub async fn status_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.storage.status_counts().await {
        Ok(_) => "ok",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": if database == "ok" { "healthy" } else { "degraded" },
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skz-api",
        "database": database,
        "emailDevMode": state.mailer.is_dev_mode(),
        "adminConfigured": state.admin.is_some(),
    }))
}
