pub mod charts;
pub mod config;
pub mod steam;
pub mod utils;

pub use charts::{ChartsScraper, ExportOptions, GameEntry, ScrapeOutcome};
pub use steam::{App, AppId, NameResolution, PlayerCountResult, SteamClient};
pub use utils::error::{Result, StatsError};
