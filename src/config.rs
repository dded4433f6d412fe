//! Configuration loader — merges env vars, .env file, and config.toml.

use common::config::BotConfig;
use common::Error;
use std::path::Path;

fn parse_probability(raw: &str, env_name: &str) -> Result<f64, Error> {
    let parsed = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::Config(format!("{env_name} must be a number in [0,1]")))?;
    if !(0.0..=1.0).contains(&parsed) {
        return Err(Error::Config(format!("{env_name} must be a number in [0,1]")));
    }
    Ok(parsed)
}

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64, Error> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn validate_config(config: &BotConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.news_api_key.trim().is_empty() {
        issues.push("NEWS_API_KEY is required (set in .env or environment)".into());
    }

    if config.kalshi.base_url.trim().is_empty() {
        issues.push("kalshi.base_url must not be empty".into());
    }
    if config.kalshi.market_limit == 0 {
        issues.push("kalshi.market_limit must be > 0".into());
    }
    if config.kalshi.timeout_secs == 0 {
        issues.push("kalshi.timeout_secs must be > 0".into());
    }

    if config.news.base_url.trim().is_empty() {
        issues.push("news.base_url must not be empty".into());
    }
    if config.news.page_size == 0 {
        issues.push("news.page_size must be > 0".into());
    }
    if config.news.max_query_chars == 0 {
        issues.push("news.max_query_chars must be > 0".into());
    }
    if config.news.timeout_secs == 0 {
        issues.push("news.timeout_secs must be > 0".into());
    }

    let strat = &config.strategy;
    if !(0.0..=1.0).contains(&strat.edge_threshold) {
        issues.push("strategy.edge_threshold must be in [0,1]".into());
    }
    if !(0.0..=1.0).contains(&strat.strong_edge) {
        issues.push("strategy.strong_edge must be in [0,1]".into());
    }
    if strat.max_markets == 0 {
        issues.push("strategy.max_markets must be > 0".into());
    }
    if strat.max_suggestions == 0 {
        issues.push("strategy.max_suggestions must be > 0".into());
    }
    if strat.max_query_chars < strat.min_query_chars {
        issues.push("strategy.max_query_chars must be >= strategy.min_query_chars".into());
    }
    if !(0.0..1.0).contains(&strat.min_price) || !(0.0..=1.0).contains(&strat.max_price) {
        issues.push("strategy.min_price and strategy.max_price must be in [0,1]".into());
    }
    if strat.min_price >= strat.max_price {
        issues.push("strategy.min_price must be < strategy.max_price".into());
    }

    if config.cache.markets_ttl_secs == 0 {
        issues.push("cache.markets_ttl_secs must be > 0".into());
    }
    if config.cache.news_ttl_secs == 0 {
        issues.push("cache.news_ttl_secs must be > 0".into());
    }
    if config.timing.refresh_interval_secs == 0 {
        issues.push("timing.refresh_interval_secs must be > 0".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Load bot configuration from environment and optional config file.
pub fn load_config() -> Result<BotConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = BotConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    if let Ok(key) = std::env::var("NEWS_API_KEY") {
        config.news_api_key = key.trim().to_string();
    }
    if let Ok(url) = std::env::var("KALSHI_API_BASE_URL") {
        if url.trim().is_empty() {
            tracing::warn!("Ignoring empty KALSHI_API_BASE_URL override");
        } else {
            tracing::info!("Using KALSHI_API_BASE_URL override: {}", url.trim());
            config.kalshi.base_url = url.trim().to_string();
        }
    }
    if let Ok(url) = std::env::var("NEWS_API_BASE_URL") {
        if !url.trim().is_empty() {
            config.news.base_url = url.trim().to_string();
        }
    }
    if let Ok(raw) = std::env::var("EDGE_THRESHOLD") {
        config.strategy.edge_threshold = parse_probability(&raw, "EDGE_THRESHOLD")?;
    }
    if let Ok(raw) = std::env::var("EDGE_MAX_MARKETS") {
        config.strategy.max_markets = parse_positive_u64(&raw, "EDGE_MAX_MARKETS")? as usize;
    }
    if let Ok(raw) = std::env::var("REFRESH_INTERVAL_SECS") {
        config.timing.refresh_interval_secs = parse_positive_u64(&raw, "REFRESH_INTERVAL_SECS")?;
    }

    // 5. Validate.
    validate_config(&config)?;

    Ok(config)
}
