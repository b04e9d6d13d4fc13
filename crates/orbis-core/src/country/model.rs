//! Country record domain model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A country as returned by the REST Countries directory.
///
/// `cca3` and `name` are required; everything else is either defaulted or
/// explicitly optional. Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code, the identity of a country.
    pub cca3: String,
    pub name: CountryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cca2: Option<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capital: Vec<String>,
    /// Area in square kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Currencies keyed by ISO 4217 code.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub currencies: BTreeMap<String, Currency>,
    /// Language names keyed by ISO 639-3 code.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub languages: BTreeMap<String, String>,
    /// `cca3` codes of neighbouring countries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timezones: Vec<String>,
    /// Top level domains.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tld: Vec<String>,
    #[serde(default)]
    pub flags: Flags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CountryName {
    /// Display name, also the de-duplication key of the visit history.
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Flags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Country {
    /// Creates a country with only the identifying fields set.
    pub fn new(cca3: impl Into<String>, common_name: impl Into<String>) -> Self {
        let common = common_name.into();
        Self {
            cca3: cca3.into(),
            name: CountryName {
                official: common.clone(),
                common,
            },
            cca2: None,
            population: 0,
            region: String::new(),
            subregion: None,
            capital: Vec::new(),
            area: None,
            currencies: BTreeMap::new(),
            languages: BTreeMap::new(),
            borders: Vec::new(),
            timezones: Vec::new(),
            tld: Vec::new(),
            flags: Flags::default(),
        }
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_borders<I, S>(mut self, borders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.borders = borders.into_iter().map(Into::into).collect();
        self
    }

    /// The display name.
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// Preferred flag image URL (SVG first, then PNG).
    pub fn flag_url(&self) -> Option<&str> {
        self.flags.svg.as_deref().or(self.flags.png.as_deref())
    }
}
