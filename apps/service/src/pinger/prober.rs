use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use super::types::{ProbeOutcome, ProbeReport};

/// Path appended to every target URL. Fetching it proves the HTTP stack is
/// alive without caring what the site actually serves.
const LIVENESS_PATH: &str = "/robots.txt";

/// Prober trait so the scheduler can run against scripted probes in tests.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Probe one target and classify the result.
    async fn probe(&self, url: &str) -> Result<ProbeReport>;
}

/// HTTP prober backed by a shared reqwest client with the probe timeout
/// baked in.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("building probe HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> Result<ProbeReport> {
        let probe_url = format!("{}{}", url.trim_end_matches('/'), LIVENESS_PATH);
        let start = Instant::now();

        let outcome = match self.client.get(&probe_url).send().await {
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) if e.is_timeout() => ProbeOutcome::Timeout,
            Err(e) if e.is_connect() => ProbeOutcome::ConnectionError,
            Err(e) => return Err(e).with_context(|| format!("probing {probe_url}")),
        };

        Ok(ProbeReport {
            outcome,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
