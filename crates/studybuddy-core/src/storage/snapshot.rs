//! Snapshot persistence.
//!
//! The whole [`AppState`] is stored as one JSON document under a fixed
//! namespace key. Saving replaces the document in a single statement, so a
//! reader sees either the previous snapshot or the new one.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use super::{data_dir, Config};
use crate::error::StorageError;
use crate::state::AppState;

/// Key-value slot holding the application snapshot.
pub trait SnapshotStore {
    /// Read the stored snapshot, `None` on first run.
    fn load(&self) -> Result<Option<AppState>, StorageError>;

    /// Replace the stored snapshot with `state`.
    fn save(&mut self, state: &AppState) -> Result<(), StorageError>;
}

/// SQLite-backed snapshot store.
pub struct SqliteSnapshotStore {
    conn: Connection,
    namespace: String,
}

impl SqliteSnapshotStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path, namespace: impl Into<String>) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn, namespace)
    }

    /// Open the database named in `config` inside the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory or the database is unavailable.
    pub fn open_default(config: &Config) -> Result<Self, StorageError> {
        let path = data_dir()?.join(&config.storage.database_file);
        Self::open(&path, config.storage.namespace.clone())
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot create the schema.
    pub fn open_in_memory(namespace: impl Into<String>) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?, namespace)
    }

    fn with_connection(conn: Connection, namespace: impl Into<String>) -> Result<Self, StorageError> {
        let store = Self {
            conn,
            namespace: namespace.into(),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get a raw value from the kv table.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a raw value in the kv table.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove the snapshot entirely.
    pub fn clear(&self) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![self.namespace])?;
        Ok(())
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> Result<Option<AppState>, StorageError> {
        let Some(raw) = self.kv_get(&self.namespace)? else {
            return Ok(None);
        };
        let mut state: AppState = serde_json::from_str(&raw)?;
        state.normalize();
        Ok(Some(state))
    }

    fn save(&mut self, state: &AppState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)?;
        self.kv_set(&self.namespace, &raw)?;
        debug!(namespace = %self.namespace, bytes = raw.len(), "snapshot saved");
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshot: Option<String>,
    /// When set, every save fails with `WriteRejected`.
    pub fail_writes: bool,
    /// Number of upcoming saves that fail before writes succeed again.
    pub fail_next: usize,
    saves: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every save is rejected.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn raw(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<AppState>, StorageError> {
        match &self.snapshot {
            Some(raw) => {
                let mut state: AppState = serde_json::from_str(raw)?;
                state.normalize();
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &AppState) -> Result<(), StorageError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(StorageError::WriteRejected("storage quota exceeded".into()));
        }
        if self.fail_writes {
            return Err(StorageError::WriteRejected("storage quota exceeded".into()));
        }
        self.snapshot = Some(serde_json::to_string(state)?);
        self.saves += 1;
        Ok(())
    }
}
