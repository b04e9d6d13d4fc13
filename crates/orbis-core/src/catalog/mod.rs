//! Listing view state: search term, region filter and sort order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString, IntoStaticStr};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::country::Country;

/// Regions offered by the region filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// Spelling used by the remote directory.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Population,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next sort order after selecting `key`: selecting the active key while
    /// ascending flips to descending, anything else starts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { key, direction }
    }

    fn compare(&self, a: &Country, b: &Country) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => collation_key(&a.name.common)
                .cmp(&collation_key(&b.name.common))
                .then_with(|| a.name.common.cmp(&b.name.common)),
            SortKey::Population => a.population.cmp(&b.population),
            SortKey::Area => a
                .area
                .unwrap_or(0.0)
                .total_cmp(&b.area.unwrap_or(0.0)),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Case- and accent-insensitive form of `name`, so "Åland Islands" sorts
/// with the A's.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Combined filter and sort applied to the full country list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the display name. Empty matches all.
    pub search: String,
    /// `None` shows every region.
    pub region: Option<Region>,
    pub sort: SortConfig,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches(&self, country: &Country) -> bool {
        let term = self.search.trim().to_lowercase();
        if !term.is_empty() && !country.name.common.to_lowercase().contains(&term) {
            return false;
        }
        match self.region {
            Some(region) => country.region == region.as_str(),
            None => true,
        }
    }

    /// Filters then stably sorts a copy of `countries`.
    pub fn apply(&self, countries: &[Country]) -> Vec<Country> {
        let mut result: Vec<Country> = countries
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect();
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Vec<Country> {
        vec![
            Country::new("DEU", "Germany")
                .with_region("Europe")
                .with_population(83_240_525)
                .with_area(357_114.0),
            Country::new("JPN", "Japan")
                .with_region("Asia")
                .with_population(125_836_021)
                .with_area(377_930.0),
            Country::new("ATA", "Antarctica").with_region("Antarctic"),
            Country::new("AUT", "austria")
                .with_region("Europe")
                .with_population(8_917_205)
                .with_area(83_871.0),
        ]
    }

    fn codes(countries: &[Country]) -> Vec<&str> {
        countries.iter().map(|c| c.cca3.as_str()).collect()
    }

    #[test]
    fn test_default_sorts_by_name_case_insensitively() {
        let result = CatalogQuery::new().apply(&sample());
        assert_eq!(codes(&result), vec!["ATA", "AUT", "DEU", "JPN"]);
    }

    #[test]
    fn test_name_sort_ignores_accents() {
        let countries: Vec<Country> = [
            ("ALA", "Åland Islands"),
            ("ZWE", "Zimbabwe"),
            ("AUS", "Australia"),
            ("CIV", "Côte d'Ivoire"),
            ("CUB", "Cuba"),
        ]
        .into_iter()
        .map(|(code, name)| Country::new(code, name))
        .collect();

        let result = CatalogQuery::new().apply(&countries);
        assert_eq!(codes(&result), vec!["ALA", "AUS", "CIV", "CUB", "ZWE"]);

        let sort = SortConfig::new(SortKey::Name, SortDirection::Desc);
        let result = CatalogQuery::new().with_sort(sort).apply(&countries);
        assert_eq!(codes(&result), vec!["ZWE", "CUB", "CIV", "AUS", "ALA"]);
    }

    #[test]
    fn test_collation_key_folds_case_and_marks() {
        assert_eq!(collation_key("Côte d'Ivoire"), "cote d'ivoire");
        assert_eq!(collation_key("São Tomé and Príncipe"), "sao tome and principe");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let result = CatalogQuery::new().with_search("AN").apply(&sample());
        assert_eq!(codes(&result), vec!["ATA", "DEU", "JPN"]);
    }

    #[test]
    fn test_region_filter() {
        let result = CatalogQuery::new()
            .with_region(Some(Region::Europe))
            .apply(&sample());
        assert_eq!(codes(&result), vec!["AUT", "DEU"]);
    }

    #[test]
    fn test_population_descending() {
        let sort = SortConfig::new(SortKey::Population, SortDirection::Desc);
        let result = CatalogQuery::new().with_sort(sort).apply(&sample());
        assert_eq!(codes(&result), vec!["JPN", "DEU", "AUT", "ATA"]);
    }

    #[test]
    fn test_missing_area_sorts_as_zero() {
        let sort = SortConfig::new(SortKey::Area, SortDirection::Asc);
        let result = CatalogQuery::new().with_sort(sort).apply(&sample());
        assert_eq!(codes(&result), vec!["ATA", "AUT", "DEU", "JPN"]);
    }

    #[test]
    fn test_combined_filters_can_be_empty() {
        let result = CatalogQuery::new()
            .with_search("japan")
            .with_region(Some(Region::Europe))
            .apply(&sample());
        assert!(result.is_empty());
    }

    #[test]
    fn test_sort_toggle() {
        let sort = SortConfig::default();
        let flipped = sort.toggle(SortKey::Name);
        assert_eq!(flipped, SortConfig::new(SortKey::Name, SortDirection::Desc));
        assert_eq!(
            flipped.toggle(SortKey::Name),
            SortConfig::new(SortKey::Name, SortDirection::Asc)
        );
        assert_eq!(
            flipped.toggle(SortKey::Area),
            SortConfig::new(SortKey::Area, SortDirection::Asc)
        );
    }

    #[test]
    fn test_parse_region_and_sort_key() {
        assert_eq!(Region::from_str("europe").unwrap(), Region::Europe);
        assert!(Region::from_str("Atlantis").is_err());
        assert_eq!(SortKey::from_str("Population").unwrap(), SortKey::Population);
        assert_eq!(Region::Americas.to_string(), "Americas");
        assert_eq!(SortKey::Area.to_string(), "area");
        assert_eq!(Region::Oceania.as_str(), "Oceania");
    }
}
