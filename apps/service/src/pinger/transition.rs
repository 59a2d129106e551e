use super::types::{ProbeOutcome, TargetStatus};

/// Sentinel prepended to recovery notifications. Kept byte-for-byte as the
/// sink already renders it.
pub const OK_PREFIX: &str = ":heavy_check_mark";

/// Sentinel prepended to degradation notifications.
pub const FAIL_PREFIX: &str = ":heavy_multiplication_x:";

/// Response codes that count as the target being reachable.
pub const REACHABLE_CODES: [u16; 3] = [200, 301, 302];

/// Result of applying the transition rules to one probe: the status to
/// record and the notification text the change warrants, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: TargetStatus,
    pub notice: Option<String>,
}

pub fn reachable(outcome: ProbeOutcome) -> bool {
    matches!(outcome, ProbeOutcome::Status(code) if REACHABLE_CODES.contains(&code))
}

/// Decide the next recorded status for a target. Pure; the scheduler owns
/// all persistence and delivery.
///
/// A connection error against a currently-OK target leaves the status
/// untouched: a single failed connect is treated as transient network
/// noise, while a timeout or an explicit bad status flips the target to
/// FAIL. The asymmetry is intentional; do not collapse the two failure
/// modes.
pub fn decide(
    name: &str,
    previous: TargetStatus,
    outcome: ProbeOutcome,
    timeout_seconds: u64,
) -> Transition {
    match (previous, outcome) {
        (prev, out) if reachable(out) => Transition {
            next: TargetStatus::Ok,
            notice: (prev == TargetStatus::Fail)
                .then(|| format!("{OK_PREFIX} - {name} is back up!")),
        },
        (TargetStatus::Ok, ProbeOutcome::Status(code)) => Transition {
            next: TargetStatus::Fail,
            notice: Some(format!("{FAIL_PREFIX} - {name} responded with HTTP{code}")),
        },
        (TargetStatus::Ok, ProbeOutcome::Timeout) => Transition {
            next: TargetStatus::Fail,
            notice: Some(format!(
                "{FAIL_PREFIX} - {name} timed out after {timeout_seconds} seconds"
            )),
        },
        (TargetStatus::Ok, ProbeOutcome::ConnectionError) => Transition {
            next: TargetStatus::Ok,
            notice: None,
        },
        (TargetStatus::Fail, _) => Transition {
            next: TargetStatus::Fail,
            notice: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: u64 = 10;

    fn decide_t(previous: TargetStatus, outcome: ProbeOutcome) -> Transition {
        decide("api", previous, outcome, TIMEOUT)
    }

    #[test]
    fn ok_target_reachable_stays_quiet() {
        for code in REACHABLE_CODES {
            let t = decide_t(TargetStatus::Ok, ProbeOutcome::Status(code));
            assert_eq!(t.next, TargetStatus::Ok);
            assert_eq!(t.notice, None);
        }
    }

    #[test]
    fn ok_target_bad_status_fails_and_notifies() {
        let t = decide_t(TargetStatus::Ok, ProbeOutcome::Status(503));
        assert_eq!(t.next, TargetStatus::Fail);
        assert_eq!(
            t.notice.as_deref(),
            Some(":heavy_multiplication_x: - api responded with HTTP503")
        );
    }

    #[test]
    fn ok_target_timeout_fails_and_notifies() {
        let t = decide_t(TargetStatus::Ok, ProbeOutcome::Timeout);
        assert_eq!(t.next, TargetStatus::Fail);
        assert_eq!(
            t.notice.as_deref(),
            Some(":heavy_multiplication_x: - api timed out after 10 seconds")
        );
    }

    #[test]
    fn ok_target_connection_error_is_ignored() {
        let t = decide_t(TargetStatus::Ok, ProbeOutcome::ConnectionError);
        assert_eq!(t.next, TargetStatus::Ok);
        assert_eq!(t.notice, None);
    }

    #[test]
    fn failed_target_reachable_recovers_and_notifies() {
        let t = decide_t(TargetStatus::Fail, ProbeOutcome::Status(200));
        assert_eq!(t.next, TargetStatus::Ok);
        assert_eq!(t.notice.as_deref(), Some(":heavy_check_mark - api is back up!"));
    }

    #[test]
    fn failed_target_still_unreachable_stays_quiet() {
        for outcome in [
            ProbeOutcome::Status(500),
            ProbeOutcome::Status(404),
            ProbeOutcome::Timeout,
            ProbeOutcome::ConnectionError,
        ] {
            let t = decide_t(TargetStatus::Fail, outcome);
            assert_eq!(t.next, TargetStatus::Fail);
            assert_eq!(t.notice, None);
        }
    }

    #[test]
    fn redirects_count_as_reachable() {
        assert!(reachable(ProbeOutcome::Status(301)));
        assert!(reachable(ProbeOutcome::Status(302)));
        assert!(!reachable(ProbeOutcome::Status(303)));
        assert!(!reachable(ProbeOutcome::Status(400)));
        assert!(!reachable(ProbeOutcome::Timeout));
        assert!(!reachable(ProbeOutcome::ConnectionError));
    }

    /// Feeding a constant outcome stream back through `decide` settles after
    /// a single application: the status no longer moves and nothing further
    /// is notified.
    #[test]
    fn constant_outcome_converges_without_oscillation() {
        let outcomes = [
            ProbeOutcome::Status(200),
            ProbeOutcome::Status(301),
            ProbeOutcome::Status(404),
            ProbeOutcome::Status(503),
            ProbeOutcome::Timeout,
            ProbeOutcome::ConnectionError,
        ];

        for previous in [TargetStatus::Ok, TargetStatus::Fail] {
            for outcome in outcomes {
                let first = decide_t(previous, outcome);
                let second = decide_t(first.next, outcome);
                assert_eq!(second.next, first.next, "{previous:?} + {outcome:?} oscillated");
                assert_eq!(second.notice, None, "{previous:?} + {outcome:?} re-notified");
            }
        }
    }
}
