use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use libsql::params;
use std::time::SystemTime;

use super::models::Target;
use crate::pinger::types::TargetStatus;
use crate::pool::{StoreManager, StorePool};

/// Store trait abstracting target persistence.
///
/// The scheduler reads a fresh snapshot through this every cycle; the admin
/// CLI edits through it between cycles.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// All monitored targets with their last recorded status.
    async fn list_targets(&self) -> Result<Vec<Target>>;

    /// Record a status transition for one target.
    async fn update_status(&self, name: &str, status: TargetStatus) -> Result<()>;

    /// Address notifications are delivered to.
    async fn sink_url(&self) -> Result<String>;

    /// Add a target. Fails if the name is already taken.
    async fn add_target(&self, target: &Target) -> Result<i64>;

    /// Remove a target by name.
    async fn remove_target(&self, name: &str) -> Result<()>;

    /// Point an existing target at a new URL.
    async fn set_target_url(&self, name: &str, url: &str) -> Result<()>;

    /// Replace the notification sink address.
    async fn set_sink_url(&self, url: &str) -> Result<()>;
}

/// libsql-backed store implementation.
pub struct StoreImpl {
    pool: StorePool,
}

impl StoreImpl {
    /// Create a new store instance from a pool
    pub fn new_from_pool(pool: StorePool) -> Self {
        Self { pool }
    }

    /// Get a connection from the pool
    async fn get_conn(&self) -> Result<deadpool::managed::Object<StoreManager>> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl TargetStore for StoreImpl {
    async fn list_targets(&self) -> Result<Vec<Target>> {
        let conn = self.get_conn().await?;
        let mut stmt = conn
            .prepare("SELECT name, url, status, created_at, updated_at FROM targets ORDER BY name")
            .await?;

        let mut rows = stmt.query(()).await?;
        let mut targets = Vec::new();

        while let Some(row) = rows.next().await? {
            let status: String = row.get(2)?;
            let created_at: i64 = row.get(3)?;
            let updated_at: i64 = row.get(4)?;

            targets.push(Target {
                name: row.get(0)?,
                url: row.get(1)?,
                status: TargetStatus::from_column(&status),
                created_at: Target::i64_to_timestamp(created_at),
                updated_at: Target::i64_to_timestamp(updated_at),
            });
        }

        Ok(targets)
    }

    async fn update_status(&self, name: &str, status: TargetStatus) -> Result<()> {
        let conn = self.get_conn().await?;
        let now = Target::timestamp_to_i64(SystemTime::now());

        let changed = conn
            .execute(
                "UPDATE targets SET status = ?, updated_at = ? WHERE name = ?",
                params![status.to_string(), now, name.to_string()],
            )
            .await?;

        if changed == 0 {
            bail!("no target named {name}");
        }
        Ok(())
    }

    async fn sink_url(&self) -> Result<String> {
        let conn = self.get_conn().await?;
        let mut rows = conn.query("SELECT sink_url FROM meta WHERE id = 1", ()).await?;

        let row = rows
            .next()
            .await?
            .context("store has no notification sink configured")?;

        Ok(row.get(0)?)
    }

    async fn add_target(&self, target: &Target) -> Result<i64> {
        let conn = self.get_conn().await?;
        let created_at = Target::timestamp_to_i64(target.created_at);
        let updated_at = Target::timestamp_to_i64(target.updated_at);

        conn.execute(
            "INSERT INTO targets (name, url, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![
                target.name.clone(),
                target.url.clone(),
                target.status.to_string(),
                created_at,
                updated_at
            ],
        )
        .await
        .with_context(|| format!("adding target {}", target.name))?;

        Ok(conn.last_insert_rowid())
    }

    async fn remove_target(&self, name: &str) -> Result<()> {
        let conn = self.get_conn().await?;

        let changed = conn
            .execute("DELETE FROM targets WHERE name = ?", params![name.to_string()])
            .await?;

        if changed == 0 {
            bail!("no target named {name}");
        }
        Ok(())
    }

    async fn set_target_url(&self, name: &str, url: &str) -> Result<()> {
        let conn = self.get_conn().await?;
        let now = Target::timestamp_to_i64(SystemTime::now());

        let changed = conn
            .execute(
                "UPDATE targets SET url = ?, updated_at = ? WHERE name = ?",
                params![url.to_string(), now, name.to_string()],
            )
            .await?;

        if changed == 0 {
            bail!("no target named {name}");
        }
        Ok(())
    }

    async fn set_sink_url(&self, url: &str) -> Result<()> {
        let conn = self.get_conn().await?;

        conn.execute(
            "INSERT INTO meta (id, sink_url) VALUES (1, ?)
             ON CONFLICT (id) DO UPDATE SET sink_url = excluded.sink_url",
            params![url.to_string()],
        )
        .await?;

        Ok(())
    }
}
