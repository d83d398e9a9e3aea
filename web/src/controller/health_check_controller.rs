use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and responding to requests", body = String),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}

/// GET heartbeat used by the demo front end
#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Pong response confirming the API is reachable")
    )
)]
pub async fn ping() -> impl IntoResponse {
    Json(json!({"status": "ok", "message": "pong"}))
}
