//! Persisted user preferences
//!
//! Backs the session flags. Every value is a string; typed interpretation is
//! left to the caller.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::database::SharedDatabase;
use super::key_value::KeyValueStore;

/// SQLite-backed preferences store
#[derive(Clone)]
pub struct Preferences {
    db: SharedDatabase,
}

impl Preferences {
    /// Create preferences manager over an open database
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    fn get_sync(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock();
        let value = db
            .conn()
            .query_row(
                "SELECT value FROM user_preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_sync(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock();
        db.conn().execute(
            "INSERT INTO user_preferences (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = strftime('%s', 'now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_sync(&self, key: &str) -> Result<()> {
        let db = self.db.lock();
        db.conn()
            .execute("DELETE FROM user_preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for Preferences {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_sync(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!(key, "Writing preference");
        self.set_sync(key, value)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "Removing preference");
        self.remove_sync(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn prefs() -> Preferences {
        Preferences::new(Database::in_memory().unwrap().shared())
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let prefs = prefs();
        assert_eq!(prefs.get("userId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let prefs = prefs();
        prefs.set("userId", "u1").await.unwrap();
        prefs.set("userId", "u2").await.unwrap();
        assert_eq!(prefs.get("userId").await.unwrap().as_deref(), Some("u2"));
    }

    #[tokio::test]
    async fn test_remove() {
        let prefs = prefs();
        prefs.set("userId", "u1").await.unwrap();
        prefs.remove("userId").await.unwrap();
        assert_eq!(prefs.get("userId").await.unwrap(), None);

        // Removing again is fine
        prefs.remove("userId").await.unwrap();
    }
}
