pub mod account;
pub mod countries;
pub mod history;
pub mod render;
pub mod theme;

use std::sync::Arc;

use anyhow::{Context, Result};
use orbis_application::Explorer;
use orbis_core::config::OrbisConfig;
use orbis_core::preferences::Preferences;
use orbis_core::storage::KeyValueStore;
use orbis_core::{HistoryProvider, SessionProvider};
use orbis_infrastructure::{ConfigService, InMemoryStore, JsonFileStore, RestCountriesClient};

use crate::GlobalArgs;

pub fn load_config(args: &GlobalArgs) -> Result<OrbisConfig> {
    let service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = service
        .load()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;

    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(store) = &args.store {
        config.storage.path = Some(store.clone());
    }
    Ok(config)
}

/// Wires the store, both providers and the directory client together.
pub fn build_explorer(args: &GlobalArgs, config: &OrbisConfig) -> Result<Explorer> {
    let store: Arc<dyn KeyValueStore> = if args.ephemeral {
        Arc::new(InMemoryStore::new())
    } else {
        let path = ConfigService::storage_path(config)?;
        let store = JsonFileStore::open(&path)
            .with_context(|| format!("Failed to open storage at {}", path.display()))?;
        Arc::new(store)
    };

    let session = Arc::new(SessionProvider::new(store.clone()));
    session.initialize();
    let history = Arc::new(HistoryProvider::load(store.clone()));
    let directory = Arc::new(RestCountriesClient::from_config(&config.api)?);

    Ok(Explorer::new(
        directory,
        session,
        history,
        Preferences::new(store),
    ))
}
