//! Session state provider.
//!
//! Owns the current identity and the favorites collection and keeps both in
//! sync with the key-value store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::country::Country;
use crate::error::Result;
use crate::session::model::Identity;
use crate::storage::{KeyValueStore, keys, load_json, save_json};

#[derive(Debug, Clone)]
struct SessionState {
    current_user: Option<Identity>,
    favorites: Vec<Country>,
    loading: bool,
}

/// Single source of truth for the current user and their favorites.
///
/// Create it once at startup, call [`initialize`](Self::initialize), and share
/// it behind an `Arc`. Consumers only see clones of the state.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use orbis_core::session::{Identity, SessionProvider};
/// # use orbis_core::storage::KeyValueStore;
/// # use std::collections::HashMap;
/// # use std::sync::Mutex;
/// # #[derive(Default)]
/// # struct Map(Mutex<HashMap<String, String>>);
/// # impl KeyValueStore for Map {
/// #     fn get(&self, k: &str) -> orbis_core::Result<Option<String>> { Ok(self.0.lock().unwrap().get(k).cloned()) }
/// #     fn set(&self, k: &str, v: &str) -> orbis_core::Result<()> { self.0.lock().unwrap().insert(k.into(), v.into()); Ok(()) }
/// #     fn delete(&self, k: &str) -> orbis_core::Result<()> { self.0.lock().unwrap().remove(k); Ok(()) }
/// # }
///
/// let session = SessionProvider::new(Arc::new(Map::default()));
/// session.initialize();
/// assert!(!session.is_loading());
///
/// session.login(Identity::new("Ada", "ada@example.com")).unwrap();
/// assert_eq!(session.current_user().unwrap().name, "Ada");
/// ```
pub struct SessionProvider {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
}

impl SessionProvider {
    /// Creates a provider in the loading state. Nothing is read until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            state: Mutex::new(SessionState {
                current_user: None,
                favorites: Vec::new(),
                loading: true,
            }),
        }
    }

    /// Restores the stored identity and, when one exists, its favorites.
    ///
    /// Malformed stored values are treated as absent.
    pub fn initialize(&self) {
        let mut state = self.state();
        state.current_user = None;
        state.favorites = Vec::new();

        if let Some(user) = load_json::<Identity>(self.store.as_ref(), keys::USER) {
            state.favorites = self.stored_favorites().unwrap_or_default();
            tracing::debug!(
                user = %user.display_name(),
                favorites = state.favorites.len(),
                "Restored session"
            );
            state.current_user = Some(user);
        }
        state.loading = false;
    }

    /// True until the initial storage read has completed.
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.state().current_user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().current_user.is_some()
    }

    pub fn favorites(&self) -> Vec<Country> {
        self.state().favorites.clone()
    }

    /// Sets the current user and reloads any stored favorites.
    ///
    /// The stored recent-search list is reset. Favorites already stored are
    /// kept; storage is not partitioned per identity.
    pub fn login(&self, identity: Identity) -> Result<()> {
        let mut state = self.state();
        save_json(self.store.as_ref(), keys::USER, &identity)?;
        save_json(self.store.as_ref(), keys::RECENT_SEARCHES, &Vec::<Country>::new())?;

        if let Some(favorites) = self.stored_favorites() {
            state.favorites = favorites;
        }
        tracing::debug!(user = %identity.display_name(), "Logged in");
        state.current_user = Some(identity);
        Ok(())
    }

    /// Sets the current user and starts from an empty favorites collection.
    pub fn register(&self, identity: Identity) -> Result<()> {
        let mut state = self.state();
        save_json(self.store.as_ref(), keys::USER, &identity)?;
        save_json(self.store.as_ref(), keys::FAVORITES, &Vec::<Country>::new())?;
        save_json(self.store.as_ref(), keys::RECENT_SEARCHES, &Vec::<Country>::new())?;

        tracing::debug!(user = %identity.display_name(), "Registered");
        state.current_user = Some(identity);
        state.favorites = Vec::new();
        Ok(())
    }

    /// Clears the current user and resets favorites and recent searches.
    pub fn logout(&self) -> Result<()> {
        let mut state = self.state();
        self.store.delete(keys::USER)?;
        save_json(self.store.as_ref(), keys::FAVORITES, &Vec::<Country>::new())?;
        save_json(self.store.as_ref(), keys::RECENT_SEARCHES, &Vec::<Country>::new())?;

        tracing::debug!("Logged out");
        state.current_user = None;
        state.favorites = Vec::new();
        Ok(())
    }

    /// Adds `country` to the favorites, or removes it when a favorite with the
    /// same code exists.
    ///
    /// Without a current user this does nothing and returns `false`.
    /// Otherwise returns whether the country is a favorite afterwards. The
    /// full collection is persisted on every change, including when it
    /// becomes empty.
    pub fn toggle_favorite(&self, country: &Country) -> Result<bool> {
        let mut state = self.state();
        if state.current_user.is_none() {
            tracing::debug!(code = %country.cca3, "Ignoring favorite toggle without a session");
            return Ok(false);
        }

        let mut favorites = state.favorites.clone();
        let added = if favorites.iter().any(|fav| fav.cca3 == country.cca3) {
            favorites.retain(|fav| fav.cca3 != country.cca3);
            false
        } else {
            favorites.push(country.clone());
            true
        };

        save_json(self.store.as_ref(), keys::FAVORITES, &favorites)?;
        state.favorites = favorites;
        Ok(added)
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.state().favorites.iter().any(|fav| fav.cca3 == code)
    }

    fn stored_favorites(&self) -> Option<Vec<Country>> {
        let mut favorites = load_json::<Vec<Country>>(self.store.as_ref(), keys::FAVORITES)?;
        let mut seen = std::collections::HashSet::new();
        favorites.retain(|fav| seen.insert(fav.cca3.clone()));
        Some(favorites)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
