use anyhow::Result;
use colored::Colorize;
use orbis_application::Explorer;

use super::render;

pub fn list(explorer: &Explorer) {
    let recent = explorer.history().recent_searches();
    if recent.is_empty() {
        println!("{}", "No recently viewed countries".yellow());
        return;
    }
    for (index, country) in recent.iter().enumerate() {
        println!("{:>2}. {}", index + 1, render::country_row(country));
    }
}

pub fn remove(explorer: &Explorer, code: &str) -> Result<()> {
    let code = code.to_uppercase();
    if explorer.history().remove_from_history(&code)? {
        println!("{}", format!("Removed {code} from history").green());
    } else {
        println!("{}", format!("{code} is not in the history").yellow());
    }
    Ok(())
}

pub fn clear(explorer: &Explorer) -> Result<()> {
    explorer.history().clear_history()?;
    println!("{}", "History cleared".green());
    Ok(())
}
