use anyhow::Result;
use clap::Parser;
use colored::*;
use std::time::Duration;

mod api_client;
mod sse_client;

use api_client::ApiClient;
use sse_client::Connection;

#[derive(Parser)]
#[command(name = "sse-test-client")]
#[command(about = "End-to-end tester for the message relay SSE protocol")]
struct Cli {
    /// Base URL of the relay (e.g., http://localhost:4000)
    #[arg(long, default_value = "http://localhost:4000")]
    base_url: String,

    /// Message to publish and watch for on the stream
    #[arg(long, default_value = "hello from sse-test-client")]
    message: String,

    /// Expected number of burst frames (the server's --burst-count)
    #[arg(long, default_value_t = 3)]
    burst_count: u32,

    /// Seconds to wait for each expected event
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout_secs);

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    println!("{}", "=== SETUP PHASE ===".bright_white().bold());

    let api_client = ApiClient::new(reqwest::Client::new(), cli.base_url.clone());

    println!("{} Pinging {} ...", "→".blue(), cli.base_url);
    api_client.ping().await?;
    println!("{} Relay is up", "✓".green());

    println!("{} Opening stream connection...", "→".blue());
    let mut connection = Connection::establish(&cli.base_url)?;

    let handshake = connection.wait_for_event("keepalive", timeout).await?;
    println!(
        "{} Handshake received: {}",
        "✓".green(),
        handshake.data["data"]["status"]
    );

    println!("\n{}", "=== PUBLISH PHASE ===".bright_white().bold());

    println!("{} Publishing {:?}", "→".blue(), cli.message);
    let ack = api_client.publish_message(&cli.message).await?;
    println!("{} Accepted: {}", "✓".green(), ack["data"]["message"]);

    println!("\n{}", "=== STREAM PHASE ===".bright_white().bold());

    for expected_sequence in 1..=cli.burst_count {
        let event = connection.wait_for_event("message", timeout).await?;
        let data = &event.data["data"];

        anyhow::ensure!(
            data["sequence"] == expected_sequence,
            "Expected sequence {expected_sequence}, got {}",
            data["sequence"]
        );
        anyhow::ensure!(
            data["message"] == cli.message.as_str(),
            "Burst frame lost the message text: {data}"
        );

        println!(
            "{} Burst frame {}/{} (remaining {})",
            "✓".green(),
            data["sequence"],
            data["total"],
            data["remaining"]
        );
    }

    let close = connection.wait_for_event("close", timeout).await?;
    anyhow::ensure!(
        close.data["data"]["message"] == cli.message.as_str(),
        "Close frame did not echo the message: {}",
        close.data
    );
    println!("{} Close frame received: {}", "✓".green(), close.data["data"]["status"]);

    println!("\n{}", "All checks passed.".bright_green().bold());
    Ok(())
}
