//! Key-value storage port.
//!
//! The state providers persist through this small interface so the same logic
//! runs against a file on disk, an in-memory map in tests, or anything else
//! that can hold string values under string keys.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Storage keys shared by the providers.
pub mod keys {
    /// Current identity (JSON object).
    pub const USER: &str = "user";
    /// Favorite countries (JSON array).
    pub const FAVORITES: &str = "favorites";
    /// Recently visited countries, most recent first (JSON array).
    pub const RECENT_SEARCHES: &str = "recentSearches";
    /// Dark mode preference, `"true"` or `"false"`.
    pub const DARK_MODE: &str = "darkMode";
}

/// Synchronous string-keyed, string-valued storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the key entirely. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

/// Loads and parses a JSON value stored under `key`.
///
/// Absent keys, read failures and malformed values all yield `None`; the
/// latter two are logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed stored value");
            None
        }
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
