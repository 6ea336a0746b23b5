//! Scoped key-value store abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Asynchronous string key-value store
///
/// Reads may fail (storage unavailable, locked database). Callers decide
/// whether a failure is fatal.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
