use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use orbis_application::error_message;
use orbis_core::catalog::{Region, SortDirection, SortKey};
use orbis_core::error::OrbisError;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "orbis")]
#[command(about = "Orbis - explore the countries of the world", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Path to config.toml (default: <config dir>/orbis/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the REST Countries base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the storage file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Keep all state in memory for this run
    #[arg(long, global = true, conflicts_with = "store")]
    pub ephemeral: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List countries, optionally filtered and sorted
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        region: Option<Region>,

        #[arg(long, default_value_t = SortKey::Name)]
        sort: SortKey,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show the details of one country and record the visit
    Show {
        /// Alpha-3 code, e.g. DEU
        code: String,
    },
    /// Search countries by name
    Search { name: String },
    /// List the countries of a region
    Region { region: Region },
    /// Log in (favorites previously stored are restored)
    Login(IdentityArgs),
    /// Register a new user (starts with no favorites)
    Register(IdentityArgs),
    Logout,
    /// Show the logged-in user and their favorites
    Profile,
    /// Toggle a country in the favorites
    Favorite { code: String },
    /// List favorite countries
    Favorites,
    /// Recently viewed countries
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Population and region charts
    Stats,
    /// Light/dark display preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Args)]
struct IdentityArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    email: String,
}

#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
enum HistoryAction {
    List,
    Remove { code: String },
    Clear,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq, Debug)]
enum ThemeAction {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = commands::load_config(&cli.global)?;
    init_tracing(&config.logging.level, cli.global.verbose);
    let explorer = commands::build_explorer(&cli.global, &config)?;

    match cli.command {
        Commands::List {
            search,
            region,
            sort,
            desc,
        } => {
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            commands::countries::list(&explorer, search, region, sort, direction).await?
        }
        Commands::Show { code } => commands::countries::show(&explorer, &code).await?,
        Commands::Search { name } => commands::countries::search(&explorer, &name).await?,
        Commands::Region { region } => commands::countries::region(&explorer, region).await?,
        Commands::Login(args) => commands::account::login(&explorer, args.name, args.email)?,
        Commands::Register(args) => commands::account::register(&explorer, args.name, args.email)?,
        Commands::Logout => commands::account::logout(&explorer)?,
        Commands::Profile => commands::account::profile(&explorer)?,
        Commands::Favorite { code } => commands::account::favorite(&explorer, &code).await?,
        Commands::Favorites => commands::account::favorites(&explorer)?,
        Commands::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => commands::history::list(&explorer),
            HistoryAction::Remove { code } => commands::history::remove(&explorer, &code)?,
            HistoryAction::Clear => commands::history::clear(&explorer)?,
        },
        Commands::Stats => commands::countries::stats(&explorer).await?,
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => commands::theme::show(&explorer),
            ThemeAction::Toggle => commands::theme::toggle(&explorer)?,
        },
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over the configured level unless `-v`
/// is given.
fn init_tracing(level: &str, verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(err: &anyhow::Error) {
    let message = match err.downcast_ref::<OrbisError>() {
        Some(orbis_err) => error_message(orbis_err),
        None => format!("{err:#}"),
    };
    eprintln!("{}", format!("Error: {message}").red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "orbis", "list", "--region", "europe", "--sort", "population", "--desc",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                region, sort, desc, ..
            } => {
                assert_eq!(region, Some(Region::Europe));
                assert_eq!(sort, SortKey::Population);
                assert!(desc);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_ephemeral_conflicts_with_store() {
        let result = Cli::try_parse_from(["orbis", "--ephemeral", "--store", "x.json", "stats"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_history_defaults_to_list() {
        let cli = Cli::try_parse_from(["orbis", "history"]).unwrap();
        assert!(matches!(cli.command, Commands::History { action: None }));
    }
}
