//! Persistence layer
//!
//! SQLite-based storage for the persisted session flags, exposed through the
//! [`KeyValueStore`] trait so callers never touch SQL directly.

mod database;
mod key_value;
mod preferences;
#[cfg(test)]
pub(crate) mod testing;

pub use database::{Database, SharedDatabase};
pub use key_value::KeyValueStore;
pub use preferences::Preferences;
