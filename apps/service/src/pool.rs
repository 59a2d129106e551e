use anyhow::{Context, Result};
use deadpool::managed::{self, Pool, RecycleResult};
use libsql::{Connection, Database, Error as LibsqlError};

/// deadpool manager handing out connections to the local libsql database.
pub struct StoreManager {
    database: Database,
}

impl StoreManager {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl managed::Manager for StoreManager {
    type Type = Connection;
    type Error = LibsqlError;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        self.database.connect()
    }

    async fn recycle(
        &self,
        conn: &mut Self::Type,
        _: &managed::Metrics,
    ) -> RecycleResult<Self::Error> {
        // A pooled connection that cannot answer a trivial query is dropped
        // rather than handed back out.
        conn.query("SELECT 1", ())
            .await?
            .next()
            .await?
            .ok_or(LibsqlError::QueryReturnedNoRows)?;
        Ok(())
    }
}

pub type StorePool = Pool<StoreManager>;

/// Open (or create) the database file at `db_path` and wrap it in a pool.
pub async fn connect(db_path: &str) -> Result<StorePool> {
    let database = libsql::Builder::new_local(db_path)
        .build()
        .await
        .with_context(|| format!("opening database at {db_path}"))?;

    let pool = Pool::builder(StoreManager::new(database))
        .build()
        .context("building store connection pool")?;

    Ok(pool)
}
