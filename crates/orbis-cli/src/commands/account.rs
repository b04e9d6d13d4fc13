use anyhow::Result;
use colored::Colorize;
use orbis_application::Explorer;
use orbis_core::session::Identity;

use super::render;

pub fn login(explorer: &Explorer, name: String, email: String) -> Result<()> {
    explorer.login(Identity::new(name, email))?;
    let favorites = explorer.session().favorites().len();
    println!(
        "{}",
        format!("Logged in ({favorites} favorites restored)").green()
    );
    Ok(())
}

pub fn register(explorer: &Explorer, name: String, email: String) -> Result<()> {
    explorer.register(Identity::new(name, email))?;
    println!("{}", "Registered".green());
    Ok(())
}

pub fn logout(explorer: &Explorer) -> Result<()> {
    explorer.logout()?;
    println!("{}", "Logged out".green());
    Ok(())
}

pub fn profile(explorer: &Explorer) -> Result<()> {
    let profile = explorer.profile()?;
    println!("{}", profile.identity.display_name().bold());
    if !profile.identity.email.is_empty() {
        println!("{}", profile.identity.email.dimmed());
    }
    println!();
    println!("{}", "Favorites".bold());
    render::print_countries(&profile.favorites);
    Ok(())
}

pub async fn favorite(explorer: &Explorer, code: &str) -> Result<()> {
    let code = code.to_uppercase();
    if explorer.toggle_favorite(&code).await? {
        println!("{}", format!("Added {code} to favorites").green());
    } else {
        println!("{}", format!("Removed {code} from favorites").yellow());
    }
    Ok(())
}

pub fn favorites(explorer: &Explorer) -> Result<()> {
    let profile = explorer.profile()?;
    render::print_countries(&profile.favorites);
    Ok(())
}
