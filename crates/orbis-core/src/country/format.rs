//! Display helpers for country records.

use crate::country::model::Country;

/// Fallback shown for absent optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats an integer with `,` thousands separators.
///
/// ```
/// use orbis_core::country::format::group_thousands;
///
/// assert_eq!(group_thousands(83240525), "83,240,525");
/// assert_eq!(group_thousands(999), "999");
/// ```
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(", ")
    }
}

impl Country {
    pub fn formatted_population(&self) -> String {
        group_thousands(self.population)
    }

    /// Area with separators and unit, e.g. `357,114 km²`.
    pub fn formatted_area(&self) -> String {
        match self.area {
            Some(area) if area > 0.0 => format!("{} km²", group_thousands(area.round() as u64)),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn capital_label(&self) -> String {
        join_or_na(&self.capital)
    }

    pub fn subregion_label(&self) -> &str {
        self.subregion.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Currencies rendered as `Name (symbol)`.
    pub fn currency_labels(&self) -> Vec<String> {
        self.currencies
            .values()
            .map(|c| format!("{} ({})", c.name, c.symbol.as_deref().unwrap_or("")))
            .collect()
    }

    pub fn currencies_label(&self) -> String {
        join_or_na(&self.currency_labels())
    }

    pub fn language_names(&self) -> Vec<String> {
        self.languages.values().cloned().collect()
    }

    pub fn languages_label(&self) -> String {
        join_or_na(&self.language_names())
    }

    pub fn tld_label(&self) -> String {
        join_or_na(&self.tld)
    }

    pub fn timezones_label(&self) -> String {
        join_or_na(&self.timezones)
    }
}
