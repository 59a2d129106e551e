use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::pinger::types::TargetStatus;

/// A monitored host row. Identity is the unique name; the database rowid
/// never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub url: String,
    pub status: TargetStatus,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

impl Target {
    /// Create a new target. Status starts `Ok`; the first failing cycle
    /// moves it.
    pub fn new(name: String, url: String) -> Self {
        let now = SystemTime::now();
        Self {
            name,
            url,
            status: TargetStatus::Ok,
            created_at: now,
            updated_at: now,
        }
    }

    /// Convert SystemTime to Unix timestamp
    pub fn timestamp_to_i64(time: SystemTime) -> i64 {
        time.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
    }

    /// Convert Unix timestamp to SystemTime
    pub fn i64_to_timestamp(timestamp: i64) -> SystemTime {
        UNIX_EPOCH + std::time::Duration::from_secs(timestamp as u64)
    }
}
