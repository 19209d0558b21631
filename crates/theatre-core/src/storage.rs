use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TheatreError;

const SCHEMA_V1: &str = include_str!("../../../migrations/001_initial.sql");

/// SQLite-backed key/value preference store.
///
/// Each entry is a UTF-8 string value under a unique key; writing a key
/// replaces whatever was stored there before.
pub struct Preferences {
    conn: Connection,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl Preferences {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, TheatreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, TheatreError> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>, TheatreError> {
        self.conn
            .query_row(
                "SELECT value FROM preference WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Store `value` under `key`, overwriting any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<(), TheatreError> {
        self.conn.execute(
            "INSERT INTO preference (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
               value = excluded.value,
               updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete `key`. Missing keys are not an error.
    pub fn remove(&self, key: &str) -> Result<(), TheatreError> {
        self.conn
            .execute("DELETE FROM preference WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>, TheatreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM preference ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

// ── Migrations ──────────────────────────────────────────────────

/// Run schema migrations using `PRAGMA user_version` for version tracking.
fn run_migrations(conn: &Connection) -> Result<(), TheatreError> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
    }
    Ok(())
}
