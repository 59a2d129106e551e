use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use super::prober::Prober;
use super::transition::{decide, reachable};
use super::types::{ProbeOutcome, ProbeReport};
use crate::notify::Notifier;
use crate::store::TargetStore;
use crate::store::models::Target;

/// Scheduler settings, resolved from config and CLI at startup.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerSettings {
    pub interval_seconds: u64,
    pub timeout_seconds: u64,
}

/// Cycle scheduler: probes every stored target once per cycle and applies
/// the transition rules to each result.
///
/// All probes of a cycle run concurrently; each target's result is handled
/// as soon as its own probe finishes, so one hanging target delays nobody
/// but itself. The target list and sink address are re-read from the store
/// every cycle, making external edits visible on the next pass.
pub struct Scheduler {
    store: Arc<dyn TargetStore>,
    prober: Arc<dyn Prober>,
    notifier: Arc<dyn Notifier>,
    settings: SchedulerSettings,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn TargetStore>,
        prober: Arc<dyn Prober>,
        notifier: Arc<dyn Notifier>,
        settings: SchedulerSettings,
    ) -> Self {
        Self { store, prober, notifier, settings }
    }

    /// Run cycles until the process is terminated. Fixed-interval: the
    /// sleep starts after the slowest probe of the cycle has finished, so
    /// the effective period is interval + slowest probe.
    pub async fn run_forever(&self) -> Result<()> {
        loop {
            if let Err(e) = self.run_cycle().await {
                error!(error = %e, "probe cycle aborted");
            }
            tokio::time::sleep(Duration::from_secs(self.settings.interval_seconds)).await;
        }
    }

    /// One pass over every stored target. Returns once every probe has
    /// either completed or hit its own timeout.
    pub async fn run_cycle(&self) -> Result<()> {
        let targets = self.store.list_targets().await?;
        let sink_url = self.store.sink_url().await?;
        info!(targets = targets.len(), "starting probe cycle");

        let mut probes = JoinSet::new();
        for target in targets {
            let prober = self.prober.clone();
            probes.spawn(async move {
                let report = prober.probe(&target.url).await;
                (target, report)
            });
        }

        while let Some(joined) = probes.join_next().await {
            let Ok((target, report)) = joined else {
                error!("probe task panicked");
                continue;
            };

            match report {
                Ok(report) => self.settle(&target, report, &sink_url).await,
                Err(e) => {
                    // Not one of the classified outcomes. Surface it loudly
                    // and leave the target's status alone for this cycle.
                    error!(name = %target.name, error = %e, "probe failed unexpectedly");
                }
            }
        }

        Ok(())
    }

    /// Handle one finished probe: log the outcome, persist the status if it
    /// changed, then deliver the notification. Persistence comes first and
    /// is never rolled back by a delivery failure; store and notifier
    /// errors are logged and absorbed.
    async fn settle(&self, target: &Target, report: ProbeReport, sink_url: &str) {
        log_outcome(target, report);

        let transition = decide(
            &target.name,
            target.status,
            report.outcome,
            self.settings.timeout_seconds,
        );

        if transition.next != target.status {
            if let Err(e) = self.store.update_status(&target.name, transition.next).await {
                error!(name = %target.name, error = %e, "failed to persist status change");
            }
        }

        if let Some(notice) = transition.notice {
            if let Err(e) = self.notifier.send(sink_url, &notice).await {
                warn!(name = %target.name, error = %e, "notification delivery failed");
            }
        }
    }
}

/// One structured line per probe per cycle, whether or not anything
/// transitioned.
fn log_outcome(target: &Target, report: ProbeReport) {
    let code = match report.outcome {
        ProbeOutcome::Status(code) => Some(u64::from(code)),
        _ => None,
    };

    if reachable(report.outcome) {
        info!(name = %target.name, outcome = "OK", code, latency_ms = report.latency_ms, "probe finished");
        return;
    }

    let tag = match report.outcome {
        ProbeOutcome::Status(_) => "FAIL",
        ProbeOutcome::Timeout => "TIMEOUT",
        ProbeOutcome::ConnectionError => "CONNECTION_ERROR",
    };
    warn!(name = %target.name, outcome = tag, code, latency_ms = report.latency_ms, "probe finished");
}
