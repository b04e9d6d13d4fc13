//! UI preferences kept next to the session data.

use std::sync::Arc;

use crate::error::Result;
use crate::storage::{KeyValueStore, keys};

/// Dark mode toggle stored as the plain strings `"true"` / `"false"`.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Anything but a stored `"true"` reads as light mode.
    pub fn dark_mode(&self) -> bool {
        matches!(self.store.get(keys::DARK_MODE), Ok(Some(value)) if value == "true")
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.store.set(keys::DARK_MODE, if enabled { "true" } else { "false" })
    }

    /// Flips the preference and returns the new value.
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let enabled = !self.dark_mode();
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::MockStore;

    #[test]
    fn test_defaults_to_light() {
        let prefs = Preferences::new(Arc::new(MockStore::new()));
        assert!(!prefs.dark_mode());
    }

    #[test]
    fn test_toggle_round_trip() {
        let store = Arc::new(MockStore::new());
        let prefs = Preferences::new(store.clone());
        assert!(prefs.toggle_dark_mode().unwrap());
        assert_eq!(store.raw(keys::DARK_MODE).as_deref(), Some("true"));
        assert!(!prefs.toggle_dark_mode().unwrap());
        assert_eq!(store.raw(keys::DARK_MODE).as_deref(), Some("false"));
    }

    #[test]
    fn test_unexpected_value_reads_as_light() {
        let store = Arc::new(MockStore::new());
        store.put(keys::DARK_MODE, "yes");
        assert!(!Preferences::new(store).dark_mode());
    }
}
