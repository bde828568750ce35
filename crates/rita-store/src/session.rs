use clickhouse::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use rita_error::{Error, Result};

use crate::pool::PoolConfig;

/// A pooled handle to the columnar store. Cheap to clone — the underlying
/// `clickhouse::Client` is reference-counted, so every worker thread holds
/// its own `Session` over the same pool rather than sharing a lock.
#[derive(Clone)]
pub struct Session {
    client: clickhouse::Client,
    cancel: CancellationToken,
    max_execution_time_secs: u32,
}

impl Session {
    /// Open a session against `db_address` (`host:port`), authenticating
    /// with `username`/`password`, defaulting to `database` if given.
    ///
    /// # Errors
    /// Returns `Error::StoreConnect` if the initial ping fails.
    pub async fn connect(
        db_address: &str,
        username: &str,
        password: &str,
        database: Option<&str>,
        pool: PoolConfig,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let url = format!("http://{db_address}");
        let mut client = clickhouse::Client::default()
            .with_url(url)
            .with_user(username)
            .with_password(password)
            .with_option(
                "max_execution_time",
                pool.max_execution_time.as_secs().to_string(),
            );
        if let Some(db) = database {
            client = client.with_database(db);
        }

        let session = Self {
            client,
            cancel,
            max_execution_time_secs: pool.max_execution_time.as_secs() as u32,
        };
        session.ping().await?;
        Ok(session)
    }

    /// Return a session pointed at a different database on the same pool,
    /// e.g. switching from `metadatabase` to a per-dataset schema.
    #[must_use]
    pub fn with_database(&self, database: &str) -> Self {
        Self {
            client: self.client.clone().with_database(database),
            cancel: self.cancel.clone(),
            max_execution_time_secs: self.max_execution_time_secs,
        }
    }

    #[must_use]
    pub fn max_execution_time_secs(&self) -> u32 {
        self.max_execution_time_secs
    }

    async fn ping(&self) -> Result<()> {
        self.execute("SELECT 1").await.map_err(|e| {
            Error::StoreConnect(format!("ping failed: {e}"))
        })
    }

    /// Execute a statement that returns no rows (DDL, or an INSERT driven
    /// by a string of literal values). Cancellable via the shared token.
    ///
    /// # Errors
    /// Returns `Error::StoreQuery` on failure, or propagates a cancellation
    /// as `Error::StoreQuery` with a "cancelled" message.
    pub async fn execute(&self, sql: &str) -> Result<()> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::StoreQuery("cancelled".to_string())),
            result = self.client.query(sql).execute() => {
                result.map_err(|e| Error::StoreQuery(e.to_string()))
            }
        }
    }

    /// Run a query and collect every row into `T`.
    ///
    /// # Errors
    /// Returns `Error::StoreQuery` on failure or cancellation.
    pub async fn query<T>(&self, sql: &str) -> Result<Vec<T>>
    where
        T: Row + DeserializeOwned,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::StoreQuery("cancelled".to_string())),
            result = self.client.query(sql).fetch_all::<T>() => {
                result.map_err(|e| Error::StoreQuery(e.to_string()))
            }
        }
    }

    /// Insert a batch of rows into `table` as a single prepared-statement
    /// insert, the primitive the bulk writer builds each flush on top of.
    ///
    /// # Errors
    /// Returns `Error::StoreQuery` on failure or cancellation.
    pub async fn insert_batch<T>(&self, table: &str, rows: &[T]) -> Result<()>
    where
        T: Row + Serialize,
    {
        if rows.is_empty() {
            return Ok(());
        }
        let fut = async {
            let mut insert = self
                .client
                .insert(table)
                .map_err(|e| Error::StoreQuery(e.to_string()))?;
            for row in rows {
                insert
                    .write(row)
                    .await
                    .map_err(|e| Error::StoreQuery(e.to_string()))?;
            }
            insert.end().await.map_err(|e| Error::StoreQuery(e.to_string()))
        };
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::StoreQuery("cancelled".to_string())),
            result = fut => result,
        }
    }
}
