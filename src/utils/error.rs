use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("API request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("unexpected response shape from {url}: {source}")]
    MalformedResponseError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("leaderboard page {page} ({url}): {message}")]
    ParseError {
        page: usize,
        url: String,
        message: String,
    },

    #[error("invalid selector: {0}")]
    SelectorError(String),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("invalid argument: {message}")]
    InvalidArgumentError { message: String },

    #[error("invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, StatsError>;
