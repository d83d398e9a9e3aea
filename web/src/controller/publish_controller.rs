use crate::controller::{require_message, ApiResponse};
use crate::params::message::MessageParams;
use crate::Error;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::*;
use serde_json::json;
use service::AppState;

/// POST helper endpoint to push events into the SSE stream directly.
/// Same enqueue semantics as `/api/messages`, kept for curl-driven testing
/// against the stream without the front end.
#[utoipa::path(
    post,
    path = "/publish",
    request_body = MessageParams,
    responses(
        (status = 202, description = "Message queued for the event stream"),
        (status = 400, description = "Missing or empty message field")
    )
)]
pub async fn publish(
    State(app_state): State<AppState>,
    params: Option<Json<MessageParams>>,
) -> Result<impl IntoResponse, Error> {
    let message = require_message(params)?;
    debug!("POST Publish event: {message:?}");

    let data = json!({"message": message});
    app_state.queue_ref().enqueue("message", data.clone()).await;

    Ok((StatusCode::ACCEPTED, Json(ApiResponse::new("queued", data))))
}
