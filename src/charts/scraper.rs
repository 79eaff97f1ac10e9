use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use crate::charts::export::write_csv;
use crate::charts::parser::parse_top_page;
use crate::charts::types::GameEntry;
use crate::utils::error::{Result, StatsError};

/// First page of the top-games list. Page N ≥ 2 lives at `{base}/p.{N}`.
pub const DEFAULT_LEADERBOARD_URL: &str = "https://steamcharts.com/top";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("steam-stats/", env!("CARGO_PKG_VERSION"));

/// How scraped rows should be disposed of.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Write a CSV file instead of returning the rows.
    pub export: bool,
    /// Destination for the CSV; required when `export` is set. A `.csv`
    /// extension is enforced on write.
    pub path: Option<PathBuf>,
}

/// What a scrape produced: the rows, or the receipt of the export that
/// consumed them. Never both.
#[derive(Debug)]
pub enum ScrapeOutcome {
    Rows(Vec<GameEntry>),
    Exported { path: PathBuf, rows: usize },
}

/// Scraper for the paginated steamcharts top-games leaderboard.
pub struct ChartsScraper {
    client: Client,
    base_url: String,
}

pub struct ChartsScraperBuilder {
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Default for ChartsScraperBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LEADERBOARD_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ChartsScraperBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ChartsScraper> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()?;

        Ok(ChartsScraper {
            client,
            base_url: self.base_url,
        })
    }
}

impl ChartsScraper {
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ChartsScraperBuilder {
        ChartsScraperBuilder::default()
    }

    /// Fetch and parse the first `pages` leaderboard pages, strictly in
    /// order; rows are concatenated in page order. `pages == 0` fetches
    /// nothing. The first failing page aborts the scrape with an error
    /// naming that page.
    pub async fn top_games(&self, pages: usize) -> Result<Vec<GameEntry>> {
        let mut games = Vec::new();
        for page in 1..=pages {
            let url = self.page_url(page);
            tracing::debug!("fetching leaderboard page {} from {}", page, url);

            let response = self.client.get(&url).send().await?.error_for_status()?;
            let body = response.text().await?;

            let entries = parse_top_page(&body, page, &url)?;
            tracing::info!("page {}: {} games", page, entries.len());
            games.extend(entries);
        }
        Ok(games)
    }

    /// Scrape `pages` pages, then either hand back the rows or export
    /// them as CSV, depending on `export`.
    ///
    /// Requesting an export without a destination fails before any page
    /// is fetched. On export the rows go to the file, not to the caller.
    pub async fn scrape_top_games(
        &self,
        pages: usize,
        export: &ExportOptions,
    ) -> Result<ScrapeOutcome> {
        let target = match (export.export, export.path.as_deref()) {
            (false, _) => None,
            (true, Some(path)) => Some(path.to_path_buf()),
            (true, None) => {
                return Err(StatsError::InvalidArgumentError {
                    message: "an export destination is required when export is enabled"
                        .to_string(),
                });
            }
        };

        let games = self.top_games(pages).await?;

        match target {
            None => Ok(ScrapeOutcome::Rows(games)),
            Some(path) => {
                let rows = games.len();
                let path = write_csv(&games, &path)?;
                tracing::info!("exported {} games to {}", rows, path.display());
                Ok(ScrapeOutcome::Exported { path, rows })
            }
        }
    }

    fn page_url(&self, page: usize) -> String {
        if page == 1 {
            self.base_url.clone()
        } else {
            format!("{}/p.{}", self.base_url, page)
        }
    }
}
