use serde::{Deserialize, Serialize};

/// Last recorded reachability of a monitored target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetStatus {
    Ok,
    Fail,
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetStatus::Ok => write!(f, "OK"),
            TargetStatus::Fail => write!(f, "FAIL"),
        }
    }
}

impl TargetStatus {
    /// Decode a status column value. Anything unrecognized reads as `Ok`,
    /// the same default a freshly created target gets.
    pub fn from_column(value: &str) -> Self {
        match value {
            "FAIL" => TargetStatus::Fail,
            _ => TargetStatus::Ok,
        }
    }
}

/// Classified result of a single liveness probe.
///
/// `Status` means a response arrived; whether the code counts as reachable
/// is decided by the transition rules, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Status(u16),
    Timeout,
    ConnectionError,
}

/// One probe's outcome plus how long the attempt took.
#[derive(Debug, Clone, Copy)]
pub struct ProbeReport {
    pub outcome: ProbeOutcome,
    pub latency_ms: u64,
}
