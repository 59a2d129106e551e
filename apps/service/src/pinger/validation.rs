//! Target address validation.
//!
//! Applied when a target enters the store (admin commands, bootstrap
//! seeding), never on the probe path — a row that was valid when written
//! stays probeable.

use anyhow::{Result, anyhow};
use url::Url;

/// Validate a target URL before it is stored.
pub fn validate_target_url(target: &str) -> Result<()> {
    let url = Url::parse(target).map_err(|e| anyhow!("invalid URL: {e}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(anyhow!("unsupported scheme for probe target: {other}")),
    }

    if url.host_str().is_none() {
        return Err(anyhow!("target URL has no host"));
    }

    Ok(())
}
