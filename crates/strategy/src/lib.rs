//! Strategy engine crate.
//!
//! Sentiment scoring, probability estimation, edge detection, and the TTL
//! caches the scanner keeps between refreshes.

pub mod cache;
pub mod engine;
pub mod probability;
pub mod sentiment;

pub use cache::{new_market_cache, new_news_cache, MarketCache, NewsCache, TtlCache};
pub use engine::{build_query, ScanReport, ScanStats, SkipReason, StrategyEngine};
pub use probability::{est_yes_prob, side_edges};
pub use sentiment::{sentiment_score, SentimentAnalyzer};
