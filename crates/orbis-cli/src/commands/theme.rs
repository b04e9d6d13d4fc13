use anyhow::Result;
use orbis_application::Explorer;

fn label(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}

pub fn show(explorer: &Explorer) {
    println!("Theme: {}", label(explorer.preferences().dark_mode()));
}

pub fn toggle(explorer: &Explorer) -> Result<()> {
    let dark = explorer.preferences().toggle_dark_mode()?;
    println!("Theme switched to {}", label(dark));
    Ok(())
}
