//! Concrete `Messenger` implementations for the binary.

use alerts::Messenger;
use async_trait::async_trait;
use common::Error;
use serde_json::json;
use tracing::{debug, info};

/// Delivers alerts by POSTing JSON to a configured webhook.
///
/// The webhook endpoint owns the actual chat-service credentials; this side
/// only ships `{ text, destination }`.
#[derive(Debug, Clone)]
pub struct WebhookMessenger {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookMessenger {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("failed to build webhook HTTP client");

        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Messenger for WebhookMessenger {
    async fn send_message(&self, text: &str, destination: &str) -> Result<(), Error> {
        debug!("Posting alert for destination {}", destination);

        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "text": text, "destination": destination }))
            .send()
            .await
            .map_err(|e| Error::Send(e.to_string()))?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(500).collect();
            return Err(Error::Send(format!(
                "webhook returned {}: {}",
                status, excerpt
            )));
        }

        Ok(())
    }
}

/// Logs alerts instead of delivering them. Used by `--dry-run`.
pub struct LogMessenger;

#[async_trait]
impl Messenger for LogMessenger {
    async fn send_message(&self, text: &str, destination: &str) -> Result<(), Error> {
        info!("DRY-RUN alert for {}:\n{}", destination, text);
        Ok(())
    }
}
