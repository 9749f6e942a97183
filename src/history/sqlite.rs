//! SQLite-backed key-value store

use rusqlite::{params, OptionalExtension};

use super::store::{KeyValueStore, StoreResult};
use crate::db::Database;

/// Key-value store over the `storage` table
#[derive(Clone)]
pub struct SqliteStore {
    database: Database,
}

impl SqliteStore {
    /// Wrap a migrated database
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.database.get_conn()?;
        let value = conn
            .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.database.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO storage (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let conn = self.database.get_conn()?;
        conn.execute("DELETE FROM storage WHERE key = ?1", [key])?;
        Ok(())
    }
}
