//! Bot configuration types.

use serde::{Deserialize, Serialize};

/// Top-level bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// NewsAPI key.
    #[serde(default)]
    pub news_api_key: String,

    /// Kalshi market listing parameters.
    #[serde(default)]
    pub kalshi: KalshiConfig,

    /// News search parameters.
    #[serde(default)]
    pub news: NewsConfig,

    /// Edge detection parameters.
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Cache lifetimes (seconds).
    #[serde(default)]
    pub cache: CacheConfig,

    /// Dashboard refresh timing.
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KalshiConfig {
    /// REST base URL, without the `/trade-api/v2` path.
    #[serde(default = "default_kalshi_base_url")]
    pub base_url: String,
    /// Market status filter.
    #[serde(default = "default_market_status")]
    pub market_status: String,
    /// Max markets requested per fetch.
    #[serde(default = "default_market_limit")]
    pub market_limit: u32,
    #[serde(default = "default_kalshi_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Full URL of the `everything` endpoint.
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    /// Articles requested per query.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Queries are cut to this many characters before encoding.
    #[serde(default = "default_news_query_chars")]
    pub max_query_chars: usize,
    #[serde(default = "default_news_timeout")]
    pub timeout_secs: u64,
}

/// Edge detection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Minimum edge (probability units) to flag a market. Strictly greater-than.
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold: f64,
    /// Edges above this are rendered as strong.
    #[serde(default = "default_strong_edge")]
    pub strong_edge: f64,
    /// Max markets considered per scan.
    #[serde(default = "default_max_markets")]
    pub max_markets: usize,
    /// Max suggestions kept after ranking.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Minimum articles needed before a market is scored.
    #[serde(default = "default_min_articles")]
    pub min_articles: usize,
    /// Queries shorter than this (characters) are skipped.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    /// Title-derived queries are cut to this many characters.
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
    /// Markets priced at or below this are skipped.
    #[serde(default = "default_min_price")]
    pub min_price: f64,
    /// Markets priced at or above this are skipped.
    #[serde(default = "default_max_price")]
    pub max_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_markets_ttl")]
    pub markets_ttl_secs: u64,
    #[serde(default = "default_news_ttl")]
    pub news_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Automatic dashboard refresh interval.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_kalshi_base_url() -> String {
    "https://api.elections.kalshi.com".into()
}
fn default_market_status() -> String {
    "open".into()
}
fn default_market_limit() -> u32 {
    100
}
fn default_kalshi_timeout() -> u64 {
    12
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2/everything".into()
}
fn default_page_size() -> u32 {
    15
}
fn default_sort_by() -> String {
    "publishedAt".into()
}
fn default_news_query_chars() -> usize {
    180
}
fn default_news_timeout() -> u64 {
    10
}

fn default_edge_threshold() -> f64 {
    0.09
}
fn default_strong_edge() -> f64 {
    0.12
}
fn default_max_markets() -> usize {
    120
}
fn default_max_suggestions() -> usize {
    12
}
fn default_min_articles() -> usize {
    3
}
fn default_min_query_chars() -> usize {
    8
}
fn default_max_query_chars() -> usize {
    120
}
fn default_min_price() -> f64 {
    0.01
}
fn default_max_price() -> f64 {
    0.99
}

fn default_markets_ttl() -> u64 {
    600
}
fn default_news_ttl() -> u64 {
    400
}

fn default_refresh_interval() -> u64 {
    600
}

impl Default for KalshiConfig {
    fn default() -> Self {
        Self {
            base_url: default_kalshi_base_url(),
            market_status: default_market_status(),
            market_limit: default_market_limit(),
            timeout_secs: default_kalshi_timeout(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            page_size: default_page_size(),
            sort_by: default_sort_by(),
            max_query_chars: default_news_query_chars(),
            timeout_secs: default_news_timeout(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            edge_threshold: default_edge_threshold(),
            strong_edge: default_strong_edge(),
            max_markets: default_max_markets(),
            max_suggestions: default_max_suggestions(),
            min_articles: default_min_articles(),
            min_query_chars: default_min_query_chars(),
            max_query_chars: default_max_query_chars(),
            min_price: default_min_price(),
            max_price: default_max_price(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            markets_ttl_secs: default_markets_ttl(),
            news_ttl_secs: default_news_ttl(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            news_api_key: String::new(),
            kalshi: KalshiConfig::default(),
            news: NewsConfig::default(),
            strategy: StrategyConfig::default(),
            cache: CacheConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let raw = r#"{"strategy": {"edge_threshold": 0.15}}"#;
        let cfg: BotConfig = serde_json::from_str(raw).expect("config should deserialize");
        assert!((cfg.strategy.edge_threshold - 0.15).abs() < 1e-12);
        assert_eq!(cfg.strategy.max_suggestions, 12);
        assert_eq!(cfg.kalshi.market_limit, 100);
        assert_eq!(cfg.cache.news_ttl_secs, 400);
    }
}
