//! Country directory trait.

use async_trait::async_trait;

use crate::country::model::Country;
use crate::error::Result;

/// Read-only access to a remote directory of countries.
///
/// Every call is a fresh request. Failures surface as
/// [`OrbisError::Fetch`](crate::error::OrbisError::Fetch) carrying the HTTP
/// status when the remote answered.
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Returns the full collection.
    async fn fetch_all(&self) -> Result<Vec<Country>>;

    /// Fuzzy name match. A "not found" answer yields an empty collection.
    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>>;

    async fn fetch_by_region(&self, region: &str) -> Result<Vec<Country>>;

    /// Returns a single-element collection for a known code.
    async fn fetch_by_code(&self, code: &str) -> Result<Vec<Country>>;

    /// Batch lookup. An empty input returns an empty collection without
    /// touching the network.
    async fn fetch_by_codes(&self, codes: &[String]) -> Result<Vec<Country>>;
}
