pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Store outcomes a caller must tell apart from plain faults. Everything
/// else travels as an opaque `anyhow::Error`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Email or API token collided with an existing user.
    #[error("credential already registered")]
    DuplicateCredential,
}

/// Allocate a fresh opaque identifier: a v4 UUID in textual form. Every
/// entity gets one at creation and keeps it for life; association tables
/// reference entities by it, never by the internal row id.
pub fn new_uid() -> String {
    Uuid::new_v4().to_string()
}

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database with the full schema, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}
