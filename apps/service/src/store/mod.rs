/// Target store
///
/// Durable mapping of target name to address and last-known status, plus
/// the notification sink address, backed by a local libsql database.
pub mod migrations;
pub mod models;
pub mod repository;

pub use repository::{StoreImpl, TargetStore};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::config::Bootstrap;
use crate::pinger::validation::validate_target_url;
use models::Target;

/// Initialize store schema.
pub async fn initialize_store(conn: &libsql::Connection) -> Result<()> {
    migrations::run_migrations(conn).await
}

/// Seed an empty store from the bootstrap config.
///
/// A store that already holds targets is left untouched: restarts must
/// observe persisted statuses, not bootstrap defaults.
pub async fn seed_if_empty(store: &dyn TargetStore, bootstrap: &Bootstrap) -> Result<()> {
    if !store.list_targets().await?.is_empty() {
        return Ok(());
    }

    if bootstrap.targets.is_empty() {
        bail!("bootstrap target list is empty; add [[bootstrap.targets]] entries to the config file");
    }
    validate_target_url(&bootstrap.sink_url).context("bootstrap sink URL")?;

    for seed in &bootstrap.targets {
        validate_target_url(&seed.url)
            .with_context(|| format!("bootstrap target {}", seed.name))?;
        store
            .add_target(&Target::new(seed.name.clone(), seed.url.clone()))
            .await?;
    }
    store.set_sink_url(&bootstrap.sink_url).await?;

    info!(targets = bootstrap.targets.len(), "seeded empty target store from config");
    Ok(())
}
