//! Unified error type for the news-edge bot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Kalshi API error (status={status}): {message}")]
    KalshiApi { status: u16, message: String },

    #[error("News API error (status={status}): {message}")]
    NewsApi { status: u16, message: String },

    #[error("Kalshi returned no open markets")]
    NoMarkets,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for connection, timeout and undecodable-body failures, as opposed
    /// to an API answering with an error status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}
