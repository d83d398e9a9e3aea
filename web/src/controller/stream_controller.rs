use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderName, HeaderValue};
use axum::response::sse::Sse;
use axum::response::{IntoResponse, Response};
use log::*;
use service::AppState;
use sse::stream::burst_stream;
use uuid::Uuid;

/// SSE endpoint serving the finite burst protocol: a keepalive handshake on
/// connect, one queued message replayed as a timed burst, then a close event.
/// Exactly one message is served per connection; concurrent connections
/// compete for queue items.
#[utoipa::path(
    get,
    path = "/stream",
    responses(
        (status = 200, description = "Event stream: keepalive, message burst, close", content_type = "text/event-stream")
    )
)]
pub async fn stream(State(app_state): State<AppState>) -> Response {
    let connection_id = Uuid::new_v4();
    debug!("Establishing SSE connection {connection_id}");

    let stream = burst_stream(app_state.queue(), app_state.config.burst_config());

    // No comment-based keep-alive injector: the handshake frame signals
    // readiness and every stream terminates after a single burst.
    let mut response = Sse::new(stream).into_response();
    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        HeaderName::from_static("x-accel-buffering"),
        HeaderValue::from_static("no"),
    );
    response
}
