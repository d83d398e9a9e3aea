use crate::controller::{
    health_check_controller, message_controller, publish_controller, stream_controller,
};
use crate::params;
use axum::routing::{get, post};
use axum::Router;
use service::AppState;
use tower_http::services::ServeDir;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Message Relay API"
        ),
        paths(
            health_check_controller::health_check,
            health_check_controller::ping,
            message_controller::create,
            publish_controller::publish,
            stream_controller::stream,
        ),
        components(
            schemas(
                params::message::MessageParams,
            )
        ),
        tags(
            (name = "message_relay", description = "Message relay SSE demo API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(message_routes(app_state.clone()))
        .merge(publish_routes(app_state.clone()))
        .merge(stream_routes(app_state.clone()))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes(&app_state))
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check_controller::health_check))
        .route("/api/ping", get(health_check_controller::ping))
}

/// Routes for the front-end message form
fn message_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(message_controller::create))
        .with_state(app_state)
}

/// Routes for direct event publishing
fn publish_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/publish", post(publish_controller::publish))
        .with_state(app_state)
}

/// Routes for the SSE stream
fn stream_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/stream", get(stream_controller::stream))
        .with_state(app_state)
}

// This serves the static demo front end (index.html and its assets)
pub fn static_routes(app_state: &AppState) -> Router {
    Router::new().nest_service("/", ServeDir::new(&app_state.config.static_dir))
}
