//! Terminal rendering of countries and charts.

use colored::Colorize;
use orbis_application::{Charts, CountryDetail};
use orbis_core::country::Country;
use orbis_core::stats::compact_population;

const BAR_WIDTH: usize = 40;

/// One line per country: code, name, region, population.
pub fn country_row(country: &Country) -> String {
    format!(
        "{:<4} {:<32} {:<10} {:>15}",
        country.cca3,
        country.common_name(),
        country.region,
        country.formatted_population()
    )
}

pub fn print_countries(countries: &[Country]) {
    if countries.is_empty() {
        println!("{}", "No countries found".yellow());
        return;
    }
    for country in countries {
        println!("{}", country_row(country));
    }
    println!("{}", format!("{} countries", countries.len()).dimmed());
}

pub fn print_detail(detail: &CountryDetail) {
    let country = &detail.country;
    let star = if detail.is_favorite { " ★" } else { "" };
    println!("{}{}", country.common_name().bold(), star.yellow());
    if !country.name.official.is_empty() {
        println!("{}", country.name.official.dimmed());
    }
    println!();

    let fields = [
        ("Code", country.cca3.clone()),
        ("Capital", country.capital_label()),
        ("Region", country.region.clone()),
        ("Subregion", country.subregion_label().to_string()),
        ("Population", country.formatted_population()),
        ("Area", country.formatted_area()),
        ("Currencies", country.currencies_label()),
        ("Languages", country.languages_label()),
        ("Top-level domain", country.tld_label()),
        ("Timezones", country.timezones_label()),
    ];
    for (label, value) in fields {
        println!("  {:<18}{}", format!("{label}:").cyan(), value);
    }
    if let Some(flag) = country.flag_url() {
        println!("  {:<18}{}", "Flag:".cyan(), flag);
    }

    if !detail.borders.is_empty() {
        println!();
        println!("{}", "Border countries".bold());
        for border in &detail.borders {
            println!("  {} {}", border.cca3.dimmed(), border.common_name());
        }
    }
}

pub fn print_charts(charts: &Charts) {
    println!("{}", "Top countries by population".bold());
    let max = charts
        .top_population
        .first()
        .map(|entry| entry.population)
        .unwrap_or(0);
    for entry in &charts.top_population {
        println!(
            "  {:<24} {} {}",
            entry.name,
            bar(entry.population, max).green(),
            compact_population(entry.population)
        );
    }

    println!();
    println!("{}", "Countries per region".bold());
    let max = charts.regions.iter().map(|r| r.count as u64).max().unwrap_or(0);
    for region in &charts.regions {
        println!(
            "  {:<24} {} {} ({})",
            region.name,
            bar(region.count as u64, max).blue(),
            region.count,
            compact_population(region.population)
        );
    }
}

fn bar(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let width = ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width.max(1))
}
