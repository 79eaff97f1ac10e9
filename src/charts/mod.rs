pub mod export;
pub mod parser;
pub mod scraper;
pub mod types;

pub use export::write_csv;
pub use parser::parse_top_page;
pub use scraper::{
    ChartsScraper, ChartsScraperBuilder, ExportOptions, ScrapeOutcome, DEFAULT_LEADERBOARD_URL,
};
pub use types::{GameEntry, CSV_HEADER};
