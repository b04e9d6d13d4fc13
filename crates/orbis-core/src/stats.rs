//! Aggregations backing the population and region charts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::country::Country;

/// Number of countries shown in the population chart.
pub const TOP_POPULATION_COUNT: usize = 10;

const UNKNOWN_REGION: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub name: String,
    pub population: u64,
    pub flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub name: String,
    pub count: usize,
    pub population: u64,
}

/// The `limit` most populous countries, largest first.
pub fn top_by_population(countries: &[Country], limit: usize) -> Vec<PopulationEntry> {
    let mut sorted: Vec<&Country> = countries.iter().collect();
    sorted.sort_by(|a, b| b.population.cmp(&a.population));
    sorted
        .into_iter()
        .take(limit)
        .map(|c| PopulationEntry {
            name: c.name.common.clone(),
            population: c.population,
            flag: c.flag_url().map(str::to_string),
        })
        .collect()
}

/// Country count and total population per region, ordered by region name.
pub fn region_breakdown(countries: &[Country]) -> Vec<RegionSummary> {
    let mut regions: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    for country in countries {
        let name = if country.region.is_empty() {
            UNKNOWN_REGION
        } else {
            country.region.as_str()
        };
        let entry = regions.entry(name).or_default();
        entry.0 += 1;
        entry.1 += country.population;
    }
    regions
        .into_iter()
        .map(|(name, (count, population))| RegionSummary {
            name: name.to_string(),
            count,
            population,
        })
        .collect()
}

/// Short population label used on chart axes: `1.4B`, `83.2M`, `1.5K`.
pub fn compact_population(value: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];
    for (threshold, suffix) in UNITS {
        if value >= threshold {
            return format!("{:.1}{}", value as f64 / threshold as f64, suffix);
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_by_population() {
        let countries: Vec<Country> = (1..=12)
            .map(|i| Country::new(format!("C{i:02}"), format!("Country {i}")).with_population(i * 100))
            .collect();
        let top = top_by_population(&countries, TOP_POPULATION_COUNT);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].name, "Country 12");
        assert_eq!(top[9].population, 300);
    }

    #[test]
    fn test_region_breakdown_groups_unknown() {
        let countries = vec![
            Country::new("DEU", "Germany").with_region("Europe").with_population(80),
            Country::new("FRA", "France").with_region("Europe").with_population(60),
            Country::new("XXX", "Nowhere"),
        ];
        let summary = region_breakdown(&countries);
        assert_eq!(
            summary,
            vec![
                RegionSummary {
                    name: "Europe".to_string(),
                    count: 2,
                    population: 140
                },
                RegionSummary {
                    name: "Unknown".to_string(),
                    count: 1,
                    population: 0
                },
            ]
        );
    }

    #[test]
    fn test_compact_population() {
        assert_eq!(compact_population(1_402_112_000), "1.4B");
        assert_eq!(compact_population(83_240_525), "83.2M");
        assert_eq!(compact_population(1_500), "1.5K");
        assert_eq!(compact_population(999), "999");
    }
}
