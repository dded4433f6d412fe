//! One refresh cycle: markets → news → sentiment → edge.
//!
//! Every HTTP call is awaited in sequence. Market and news responses are
//! cached with their own TTLs; only successful responses are cached.

use std::time::Instant;

use chrono::Utc;
use common::config::BotConfig;
use common::{Article, Error, MarketInfo};
use kalshi_client::KalshiRestClient;
use news_client::NewsClient;
use strategy::{
    new_market_cache, new_news_cache, MarketCache, NewsCache, ScanReport, ScanStats, SkipReason,
    StrategyEngine,
};
use tracing::{debug, info, warn};

pub struct Scanner {
    cfg: BotConfig,
    kalshi: KalshiRestClient,
    news: NewsClient,
    engine: StrategyEngine,
    market_cache: MarketCache,
    news_cache: NewsCache,
}

impl Scanner {
    pub fn new(cfg: BotConfig, kalshi: KalshiRestClient, news: NewsClient) -> Self {
        let engine = StrategyEngine::new(cfg.strategy.clone());
        let market_cache = new_market_cache(cfg.cache.markets_ttl_secs);
        let news_cache = new_news_cache(cfg.cache.news_ttl_secs);
        Self {
            cfg,
            kalshi,
            news,
            engine,
            market_cache,
            news_cache,
        }
    }

    /// Drop all cached responses so the next scan refetches everything.
    pub fn refresh(&self) {
        info!(
            "Clearing caches ({} market listings, {} news queries)",
            self.market_cache.len(),
            self.news_cache.len()
        );
        self.market_cache.clear();
        self.news_cache.clear();
    }

    /// Drop entries past their TTL, including keys no market asks for anymore.
    fn purge_expired(&self, now: Instant) {
        let markets = self.market_cache.purge_expired(now);
        let news = self.news_cache.purge_expired(now);
        if markets + news > 0 {
            debug!(
                "Purged {} market listings (ttl {:?}) and {} news queries (ttl {:?})",
                markets,
                self.market_cache.ttl(),
                news,
                self.news_cache.ttl()
            );
        }
    }

    /// Run a full scan. Fails only when the market list can't be obtained
    /// or comes back empty.
    pub async fn run_scan(&self) -> Result<ScanReport, Error> {
        self.purge_expired(Instant::now());

        let markets = self.load_markets().await?;
        if markets.is_empty() {
            return Err(Error::NoMarkets);
        }

        let mut stats = ScanStats {
            markets_fetched: markets.len(),
            ..ScanStats::default()
        };
        let mut found = Vec::new();

        for market in markets.iter().take(self.cfg.strategy.max_markets) {
            stats.markets_considered += 1;
            match self.scan_market(market).await {
                Ok(suggestion) => {
                    info!(
                        "EDGE: {} — {} edge={:+.3} (market={:.2}, est={:.2}, sentiment={:.2})",
                        suggestion.ticker,
                        suggestion.side,
                        suggestion.edge,
                        suggestion.market_prob,
                        suggestion.est_prob,
                        suggestion.sentiment
                    );
                    stats.record_suggestion();
                    found.push(suggestion);
                }
                Err(reason) => {
                    debug!("{}: skipped, {}", market.ticker, reason);
                    stats.record_skip(&reason);
                }
            }
        }

        let total_found = found.len();
        let suggestions = self.engine.rank(found);

        info!(
            "Scan complete: fetched={} considered={} scored={} edges={} (extreme={}, short={}, news_err={}, few_articles={})",
            stats.markets_fetched,
            stats.markets_considered,
            stats.scored,
            total_found,
            stats.skipped_extreme_price,
            stats.skipped_short_query,
            stats.skipped_news_unavailable,
            stats.skipped_few_articles,
        );

        Ok(ScanReport {
            suggestions,
            total_found,
            stats,
            refreshed_at: Utc::now(),
        })
    }

    async fn scan_market(&self, market: &MarketInfo) -> Result<common::Suggestion, SkipReason> {
        let query = self.engine.prefilter(market)?;
        let articles = self
            .load_news(&query)
            .await
            .map_err(|_| SkipReason::NewsUnavailable)?;
        self.engine.evaluate(market, &articles)
    }

    async fn load_markets(&self) -> Result<Vec<MarketInfo>, Error> {
        let kalshi = &self.cfg.kalshi;
        let key = self
            .kalshi
            .markets_endpoint(Some(&kalshi.market_status), kalshi.market_limit);

        if let Some(markets) = self.market_cache.get(&key) {
            debug!("Market list served from cache ({} markets)", markets.len());
            return Ok(markets);
        }

        info!("Fetching open markets...");
        let markets = self
            .kalshi
            .get_markets(Some(&kalshi.market_status), kalshi.market_limit)
            .await?;
        info!("Fetched {} markets", markets.len());
        self.market_cache.insert(key, markets.clone());
        Ok(markets)
    }

    async fn load_news(&self, query: &str) -> Result<Vec<Article>, Error> {
        let key = self.news.effective_query(query).to_string();

        if let Some(articles) = self.news_cache.get(&key) {
            debug!("News for {:?} served from cache ({} articles)", key, articles.len());
            return Ok(articles);
        }

        match self.news.fetch_articles(&key).await {
            Ok(articles) => {
                self.news_cache.insert(key, articles.clone());
                Ok(articles)
            }
            Err(e) => {
                warn!("News fetch failed for {:?}: {}", key, e);
                Err(e)
            }
        }
    }
}
