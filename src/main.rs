use log::{error, info};
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!(
        "Message relay starting on [{}] (burst: {} frames / {} ms)...",
        config.listen_addr(),
        config.burst_count,
        config.burst_interval_ms
    );

    let app_state = service::AppState::new(config);

    if let Err(e) = web::init_server(app_state).await {
        error!("Failed to start server: {e}");
        std::process::exit(1);
    }
}
