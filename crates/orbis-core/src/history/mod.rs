//! Recently visited countries.
//!
//! [`HistoryProvider`] keeps a capped, most-recent-first log of the countries
//! whose detail page was opened, de-duplicated by display name.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::country::Country;
use crate::error::Result;
use crate::storage::{KeyValueStore, keys, load_json, save_json};

/// Maximum number of entries kept in the history.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Default)]
struct HistoryState {
    recent: Vec<Country>,
    initialized: bool,
}

/// Owner of the recent-visits sequence.
///
/// Writes are suppressed until [`initialize`](Self::initialize) has read the
/// stored sequence, so an early add can never be clobbered by a late load.
pub struct HistoryProvider {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<HistoryState>,
}

impl HistoryProvider {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            state: Mutex::new(HistoryState::default()),
        }
    }

    /// Creates a provider and immediately performs the initial load.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let provider = Self::new(store);
        provider.initialize();
        provider
    }

    /// Reads the stored sequence and marks the provider ready.
    ///
    /// Calling it again re-reads storage, which is how callers pick up a
    /// reset done by the session provider.
    pub fn initialize(&self) {
        let mut recent =
            load_json::<Vec<Country>>(self.store.as_ref(), keys::RECENT_SEARCHES).unwrap_or_default();
        normalize(&mut recent);

        let mut state = self.state();
        state.recent = recent;
        state.initialized = true;
        tracing::debug!(entries = state.recent.len(), "History loaded");
    }

    pub fn is_initialized(&self) -> bool {
        self.state().initialized
    }

    /// Entries, most recent first.
    pub fn recent_searches(&self) -> Vec<Country> {
        self.state().recent.clone()
    }

    pub fn len(&self) -> usize {
        self.state().recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().recent.is_empty()
    }

    /// Records a visit. `None` is ignored.
    pub fn add_to_history(&self, country: Option<&Country>) -> Result<()> {
        match country {
            Some(country) => self.add(country),
            None => Ok(()),
        }
    }

    /// Moves `country` to the front, dropping any entry with the same display
    /// name and anything past [`HISTORY_LIMIT`].
    pub fn add(&self, country: &Country) -> Result<()> {
        let mut state = self.state();
        if !state.initialized {
            tracing::debug!(code = %country.cca3, "History not loaded yet, skipping add");
            return Ok(());
        }

        let mut recent = Vec::with_capacity(HISTORY_LIMIT);
        recent.push(country.clone());
        recent.extend(
            state
                .recent
                .iter()
                .filter(|item| item.name.common != country.name.common)
                .cloned(),
        );
        recent.truncate(HISTORY_LIMIT);

        save_json(self.store.as_ref(), keys::RECENT_SEARCHES, &recent)?;
        state.recent = recent;
        Ok(())
    }

    /// Removes the entry with the given code and reports whether one existed.
    /// Unknown codes change nothing.
    pub fn remove_from_history(&self, code: &str) -> Result<bool> {
        let mut state = self.state();
        if !state.recent.iter().any(|item| item.cca3 == code) {
            return Ok(false);
        }

        let recent: Vec<Country> = state
            .recent
            .iter()
            .filter(|item| item.cca3 != code)
            .cloned()
            .collect();
        save_json(self.store.as_ref(), keys::RECENT_SEARCHES, &recent)?;
        state.recent = recent;
        Ok(true)
    }

    /// Empties the history and removes the storage key.
    pub fn clear_history(&self) -> Result<()> {
        let mut state = self.state();
        self.store.delete(keys::RECENT_SEARCHES)?;
        state.recent.clear();
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Enforces the name uniqueness and size cap on a sequence read from storage.
fn normalize(recent: &mut Vec<Country>) {
    let mut seen = std::collections::HashSet::new();
    recent.retain(|item| seen.insert(item.name.common.clone()));
    recent.truncate(HISTORY_LIMIT);
}
