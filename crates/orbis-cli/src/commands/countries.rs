use anyhow::Result;
use orbis_application::Explorer;
use orbis_core::catalog::{CatalogQuery, Region, SortConfig, SortDirection, SortKey};
use tokio_util::sync::CancellationToken;

use super::render;

pub async fn list(
    explorer: &Explorer,
    search: Option<String>,
    region: Option<Region>,
    key: SortKey,
    direction: SortDirection,
) -> Result<()> {
    let mut query = CatalogQuery::new()
        .with_region(region)
        .with_sort(SortConfig::new(key, direction));
    if let Some(search) = search {
        query = query.with_search(search);
    }

    let countries = explorer.list(&query).await?;
    render::print_countries(&countries);
    Ok(())
}

/// Ctrl-C while the lookup is in flight abandons the visit.
pub async fn show(explorer: &Explorer, code: &str) -> Result<()> {
    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            guard.cancel();
        }
    });

    let result = explorer.visit(&code.to_uppercase(), &cancel).await;
    interrupt.abort();

    render::print_detail(&result?);
    Ok(())
}

pub async fn search(explorer: &Explorer, name: &str) -> Result<()> {
    let countries = explorer.search(name).await?;
    render::print_countries(&countries);
    Ok(())
}

pub async fn region(explorer: &Explorer, region: Region) -> Result<()> {
    let countries = explorer.by_region(region).await?;
    render::print_countries(&countries);
    Ok(())
}

pub async fn stats(explorer: &Explorer) -> Result<()> {
    let charts = explorer.charts().await?;
    render::print_charts(&charts);
    Ok(())
}
