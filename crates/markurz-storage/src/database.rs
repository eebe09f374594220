//! Database connection and operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        // Run migrations
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn get_pref(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM prefs WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_pref(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO prefs (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
