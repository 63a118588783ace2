// handlers/system.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "data": {
            "name": "Classroom API",
            "version": version,
            "endpoints": {
                "users": "/users[/:id] (GET ?include=contacts,subjects), /users/restore?id=",
                "contacts": "/contacts, /contacts/:user_id",
                "subjects": "/subjects[/:id], /subjects/assign/:user_id/:subject_id",
                "customers": "/customers[/:id], /customers/restore?id=",
                "profiles": "/profiles[/:id], /profiles/restore?id=",
                "health": "/health"
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "message": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
