use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::charts::DEFAULT_LEADERBOARD_URL;
use crate::steam::{AppId, DEFAULT_CATALOG_URL, DEFAULT_PLAYER_COUNT_URL};
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};

#[derive(Debug, Parser)]
#[command(name = "steam-stats")]
#[command(about = "Steam player-count lookups and steamcharts leaderboard scraping")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve game names and fetch current player counts
    Players(PlayersArgs),
    /// Scrape the steamcharts top-games leaderboard
    Top(TopArgs),
}

#[derive(Debug, Args)]
pub struct PlayersArgs {
    /// Game names to resolve against the catalog, comma separated
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// App ids to query directly, comma separated
    #[arg(long, value_delimiter = ',', conflicts_with = "names")]
    pub ids: Vec<AppId>,

    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    #[arg(long, default_value = DEFAULT_PLAYER_COUNT_URL)]
    pub player_count_url: String,
}

#[derive(Debug, Args)]
pub struct TopArgs {
    /// Number of leaderboard pages to scrape (25 games per page)
    #[arg(long, default_value = "1")]
    pub pages: usize,

    /// Write the scraped rows to a CSV file instead of printing them
    #[arg(long)]
    pub export: bool,

    /// Destination for the CSV export; a `.csv` extension is enforced
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_LEADERBOARD_URL)]
    pub base_url: String,
}

impl Validate for Cli {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Players(args) => args.validate(),
            Command::Top(args) => args.validate(),
        }
    }
}

impl Validate for PlayersArgs {
    fn validate(&self) -> Result<()> {
        if self.names.is_empty() && self.ids.is_empty() {
            return Err(StatsError::InvalidConfigValueError {
                field: "names".to_string(),
                value: String::new(),
                reason: "provide --names or --ids".to_string(),
            });
        }
        validate_url("catalog_url", &self.catalog_url)?;
        validate_url("player_count_url", &self.player_count_url)?;
        Ok(())
    }
}

impl Validate for TopArgs {
    fn validate(&self) -> Result<()> {
        validate_positive_number("pages", self.pages, 1)?;
        validate_url("base_url", &self.base_url)?;

        if self.export {
            match &self.output {
                None => {
                    return Err(StatsError::InvalidArgumentError {
                        message: "--output must be specified when --export is set".to_string(),
                    });
                }
                Some(path) => validate_path("output", path)?,
            }
        }

        Ok(())
    }
}
