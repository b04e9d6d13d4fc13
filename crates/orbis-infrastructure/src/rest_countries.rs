//! RestCountriesClient - REST Countries v3.1 implementation of `CountryDirectory`.

use async_trait::async_trait;
use orbis_core::config::{ApiConfig, DEFAULT_TIMEOUT_SECS};
use orbis_core::country::{Country, CountryDirectory};
use orbis_core::error::{OrbisError, Result};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// HTTP client for the public REST Countries API.
///
/// No caching and no retries: every call issues a fresh request.
#[derive(Clone)]
pub struct RestCountriesClient {
    client: Client,
    base_url: Url,
    fields: Vec<String>,
}

impl RestCountriesClient {
    /// Creates a client for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS), Vec::new())
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::build(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.fields.clone(),
        )
    }

    /// Restricts responses to the given fields (`?fields=a,b`).
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build(base_url: &str, timeout: Duration, fields: Vec<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| OrbisError::config(format!("Invalid API base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(OrbisError::config(format!(
                "API base URL cannot be a base: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrbisError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            fields,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !self.fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("fields", &self.fields.join(","));
        }
        url
    }

    async fn get_countries(
        &self,
        url: Url,
        failure: &'static str,
        empty_on_not_found: bool,
    ) -> Result<Vec<Country>> {
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await.map_err(|err| {
            tracing::error!(%url, error = %err, "{failure}");
            OrbisError::transport(failure)
        })?;

        let status = response.status();
        if !status.is_success() {
            if empty_on_not_found && status == StatusCode::NOT_FOUND {
                tracing::debug!(%url, "No match");
                return Ok(Vec::new());
            }
            tracing::error!(%url, status = status.as_u16(), "{failure}");
            return Err(OrbisError::fetch(status.as_u16(), failure));
        }

        let body = response.text().await.map_err(|err| {
            tracing::error!(%url, error = %err, "{failure}");
            OrbisError::transport(failure)
        })?;

        let payload: CountryPayload = serde_json::from_str(&body).map_err(|err| {
            tracing::error!(%url, error = %err, "Unexpected response body");
            OrbisError::from(err)
        })?;
        Ok(payload.into_vec())
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>> {
        self.get_countries(self.endpoint(&["all"]), "Failed to fetch countries", false)
            .await
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>> {
        self.get_countries(
            self.endpoint(&["name", name]),
            "Failed to search countries",
            true,
        )
        .await
    }

    async fn fetch_by_region(&self, region: &str) -> Result<Vec<Country>> {
        self.get_countries(
            self.endpoint(&["region", region]),
            "Failed to fetch countries by region",
            false,
        )
        .await
    }

    async fn fetch_by_code(&self, code: &str) -> Result<Vec<Country>> {
        self.get_countries(
            self.endpoint(&["alpha", code]),
            "Failed to fetch country details",
            false,
        )
        .await
    }

    async fn fetch_by_codes(&self, codes: &[String]) -> Result<Vec<Country>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint(&["alpha"]);
        url.query_pairs_mut().append_pair("codes", &codes.join(","));
        self.get_countries(url, "Failed to fetch border countries", false)
            .await
    }
}

/// `/alpha/{code}` has historically answered with either an array or a bare
/// object; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountryPayload {
    Many(Vec<Country>),
    One(Box<Country>),
}

impl CountryPayload {
    fn into_vec(self) -> Vec<Country> {
        match self {
            CountryPayload::Many(countries) => countries,
            CountryPayload::One(country) => vec![*country],
        }
    }
}
