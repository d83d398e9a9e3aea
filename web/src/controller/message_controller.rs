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

/// POST accept a message and queue it for rebroadcast on the event stream
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = MessageParams,
    responses(
        (status = 201, description = "Message accepted and queued for the event stream"),
        (status = 400, description = "Missing or empty message field")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    params: Option<Json<MessageParams>>,
) -> Result<impl IntoResponse, Error> {
    let message = require_message(params)?;
    debug!("POST Create a new message: {message:?}");

    let data = json!({"message": message});
    app_state.queue_ref().enqueue("message", data.clone()).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("accepted", data)),
    ))
}
