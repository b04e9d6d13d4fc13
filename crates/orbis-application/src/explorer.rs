//! Explorer use case.
//!
//! Combines the country directory with the session and history providers the
//! way the listing, detail and profile views need them.

use std::sync::Arc;

use orbis_core::catalog::{CatalogQuery, Region};
use orbis_core::country::{Country, CountryDirectory};
use orbis_core::error::{OrbisError, Result};
use orbis_core::history::HistoryProvider;
use orbis_core::preferences::Preferences;
use orbis_core::session::{Identity, SessionProvider};
use orbis_core::stats::{self, PopulationEntry, RegionSummary, TOP_POPULATION_COUNT};
use tokio_util::sync::CancellationToken;

/// Everything the detail view shows for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDetail {
    pub country: Country,
    pub borders: Vec<Country>,
    pub is_favorite: bool,
}

/// The logged-in user and their favorites.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub identity: Identity,
    pub favorites: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    pub top_population: Vec<PopulationEntry>,
    pub regions: Vec<RegionSummary>,
}

/// Application service injected with the directory client and both state
/// providers.
#[derive(Clone)]
pub struct Explorer {
    directory: Arc<dyn CountryDirectory>,
    session: Arc<SessionProvider>,
    history: Arc<HistoryProvider>,
    preferences: Preferences,
}

impl Explorer {
    pub fn new(
        directory: Arc<dyn CountryDirectory>,
        session: Arc<SessionProvider>,
        history: Arc<HistoryProvider>,
        preferences: Preferences,
    ) -> Self {
        Self {
            directory,
            session,
            history,
            preferences,
        }
    }

    pub fn session(&self) -> &SessionProvider {
        &self.session
    }

    pub fn history(&self) -> &HistoryProvider {
        &self.history
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Full list filtered and sorted by `query`.
    pub async fn list(&self, query: &CatalogQuery) -> Result<Vec<Country>> {
        let countries = self.directory.fetch_all().await?;
        let result = query.apply(&countries);
        tracing::debug!(total = countries.len(), shown = result.len(), "Listed countries");
        Ok(result)
    }

    pub async fn search(&self, name: &str) -> Result<Vec<Country>> {
        self.directory.fetch_by_name(name).await
    }

    pub async fn by_region(&self, region: Region) -> Result<Vec<Country>> {
        self.directory.fetch_by_region(region.as_str()).await
    }

    /// Loads the detail view for `code` and records the visit.
    ///
    /// If `cancel` fires before the lookup resolves the visit is abandoned:
    /// `Cancelled` is returned and the history is left untouched. A cancel
    /// during the border lookup also returns `Cancelled`, but the visit has
    /// already been recorded.
    pub async fn visit(&self, code: &str, cancel: &CancellationToken) -> Result<CountryDetail> {
        let found = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(OrbisError::Cancelled),
            found = self.directory.fetch_by_code(code) => found?,
        };

        let Some(country) = found.into_iter().next() else {
            return Err(OrbisError::not_found("country", code));
        };
        if cancel.is_cancelled() {
            return Err(OrbisError::Cancelled);
        }
        self.history.add(&country)?;

        let borders = if country.borders.is_empty() {
            Vec::new()
        } else {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(OrbisError::Cancelled),
                borders = self.directory.fetch_by_codes(&country.borders) => borders?,
            }
        };

        let is_favorite = self.session.is_favorite(&country.cca3);
        Ok(CountryDetail {
            country,
            borders,
            is_favorite,
        })
    }

    pub fn login(&self, identity: Identity) -> Result<()> {
        self.session.login(identity)?;
        self.history.initialize();
        Ok(())
    }

    pub fn register(&self, identity: Identity) -> Result<()> {
        self.session.register(identity)?;
        self.history.initialize();
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()?;
        self.history.initialize();
        Ok(())
    }

    /// Toggles the favorite state of `code`; returns the new state.
    pub async fn toggle_favorite(&self, code: &str) -> Result<bool> {
        if !self.session.is_authenticated() {
            return Err(OrbisError::Unauthenticated);
        }

        // Removing a known favorite needs no lookup.
        if let Some(country) = self
            .session
            .favorites()
            .into_iter()
            .find(|fav| fav.cca3.eq_ignore_ascii_case(code))
        {
            return self.session.toggle_favorite(&country);
        }

        let country = self
            .directory
            .fetch_by_code(code)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| OrbisError::not_found("country", code))?;
        self.session.toggle_favorite(&country)
    }

    /// Profile page data, only available with a session.
    pub fn profile(&self) -> Result<Profile> {
        let identity = self
            .session
            .current_user()
            .ok_or(OrbisError::Unauthenticated)?;
        Ok(Profile {
            identity,
            favorites: self.session.favorites(),
        })
    }

    pub async fn charts(&self) -> Result<Charts> {
        let countries = self.directory.fetch_all().await?;
        Ok(Charts {
            top_population: stats::top_by_population(&countries, TOP_POPULATION_COUNT),
            regions: stats::region_breakdown(&countries),
        })
    }
}

/// User-facing message for a failed operation.
pub fn error_message(err: &OrbisError) -> String {
    match err {
        OrbisError::Fetch { message, .. } => message.clone(),
        OrbisError::NotFound {
            entity_type: "country",
            ..
        } => "Country not found".to_string(),
        OrbisError::NotFound { entity_type, id } => format!("No {entity_type} named '{id}'"),
        OrbisError::Unauthenticated => "Please log in first".to_string(),
        OrbisError::Cancelled => "Cancelled".to_string(),
        other => other.to_string(),
    }
}
