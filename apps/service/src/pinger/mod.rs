/// Probing core
///
/// This module is responsible for:
/// - Performing one bounded-timeout HTTP liveness probe per target
/// - Deciding status transitions from probe outcomes (pure rules)
/// - Scheduling one concurrent probe pass over all targets per cycle
/// - Validating target addresses before they enter the store
pub mod prober;
pub mod scheduler;
pub mod transition;
pub mod types;
pub mod validation;

pub use prober::HttpProber;
pub use scheduler::{Scheduler, SchedulerSettings};
