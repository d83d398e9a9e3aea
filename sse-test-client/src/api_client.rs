use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Confirm the relay is up before opening a stream.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/api/ping", self.base_url))
            .send()
            .await
            .context("Failed to reach /api/ping")?;

        anyhow::ensure!(
            response.status().is_success(),
            "Ping failed with status {}",
            response.status()
        );
        Ok(())
    }

    /// POST a message and return the acknowledgment body.
    pub async fn publish_message(&self, message: &str) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/api/messages", self.base_url))
            .json(&json!({"message": message}))
            .send()
            .await
            .context("Failed to POST /api/messages")?;

        let status = response.status();
        let body: Value = response.json().await.context("Non-JSON response body")?;

        anyhow::ensure!(
            status.as_u16() == 201,
            "Expected 201, got {status} with body {body}"
        );
        Ok(body)
    }
}
