use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Outbound notification sink. Delivery is fire-and-forget: the caller logs
/// a failure and moves on, never retries.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, sink_url: &str, text: &str) -> Result<()>;
}

/// Posts notifications as a one-field JSON body, the shape Slack-compatible
/// webhook endpoints accept.
pub struct WebhookNotifier {
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("building webhook HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, sink_url: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(sink_url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .with_context(|| format!("posting notification to {sink_url}"))?;

        response
            .error_for_status()
            .context("notification sink rejected the payload")?;

        Ok(())
    }
}
