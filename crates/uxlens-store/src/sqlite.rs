//! SQLite document store
//!
//! One row per analysis: the id, the creation time for ordering, and the
//! full record as a JSON document. The connection is shared behind a mutex
//! and every statement runs on the blocking pool.

use crate::error::{StoreError, StoreResult};
use crate::store::AnalysisStore;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use uxlens_model::{Analysis, AnalysisId, NewAnalysis};

const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS analyses (
    id         TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    document   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses (created_at);
";

/// Analysis store backed by a SQLite file
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply migrations
    ///
    /// # Errors
    /// Driver errors, or [`StoreError::SchemaTooNew`] when the file was
    /// written by a newer build.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            tracing::warn!(error = %err, "failed to enable WAL mode");
        }
        let store = Self::from_connection(conn)?;
        tracing::info!(path = %path.display(), "analysis database ready");
        Ok(store)
    }

    /// Private in-memory database
    ///
    /// # Errors
    /// Driver errors.
    pub fn in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> StoreResult<Self> {
        run_migrations(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<F, T>(&self, task: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            task(&guard)
        })
        .await?
    }
}

fn run_migrations(conn: &mut Connection) -> StoreResult<()> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::SchemaTooNew {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_V1)?;
    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
    tx.commit()?;

    tracing::debug!(from = version, to = CURRENT_SCHEMA_VERSION, "schema migrated");
    Ok(())
}

#[async_trait]
impl AnalysisStore for SqliteStore {
    async fn insert(&self, analysis: NewAnalysis) -> StoreResult<Analysis> {
        let record = analysis.into_analysis(AnalysisId::new(), Utc::now());
        let document = serde_json::to_string(&record)?;
        let id = record.id.to_string();
        let created_at = record.created_at.to_rfc3339();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO analyses (id, created_at, document) VALUES (?1, ?2, ?3)",
                params![id, created_at, document],
            )?;
            Ok(())
        })
        .await?;

        tracing::debug!(id = %record.id, backend = "sqlite", "analysis stored");
        Ok(record)
    }

    async fn get(&self, id: &AnalysisId) -> StoreResult<Option<Analysis>> {
        let key = id.to_string();
        let document: Option<String> = self
            .with_conn(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT document FROM analyses WHERE id = ?1",
                        params![key],
                        |row| row.get(0),
                    )
                    .optional()?)
            })
            .await?;

        document
            .map(|doc| serde_json::from_str(&doc).map_err(StoreError::from))
            .transpose()
    }

    async fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?)
            })
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION + 1)
            .unwrap();

        let err = run_migrations(&mut conn).unwrap_err();
        assert!(matches!(err, StoreError::SchemaTooNew { found: 2, supported: 1 }));
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.get(&AnalysisId::new()).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
