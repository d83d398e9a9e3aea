use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use log::*;
use service::AppState;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub(crate) mod controller;
mod error;
pub(crate) mod params;
pub mod router;

pub use error::{Error, Result};

/// Bind the configured interface and serve the router until a shutdown
/// signal arrives.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_addr = app_state.config.listen_addr();

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(allowed_origins(&app_state));

    let router = router::define_routes(app_state.clone()).layer(cors_layer);

    info!("Server starting... on {listen_addr}");

    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(app_state))
        .await
}

fn allowed_origins(app_state: &AppState) -> Vec<HeaderValue> {
    app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping malformed CORS origin {origin}: {e}");
                None
            }
        })
        .collect()
}

/// Resolves on ctrl-c. Closing the queue releases any stream still blocked
/// in its queue wait so graceful shutdown is not held open by idle streams.
async fn shutdown_signal(app_state: AppState) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, closing message queue");
            app_state.queue_ref().close();
        }
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }
}
