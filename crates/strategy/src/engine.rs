//! Edge detection engine.
//!
//! Decides per market whether it is worth a news lookup, scores the articles
//! that come back, and turns the sentiment-implied probability into a
//! `Suggestion` when it diverges from the market price by more than the
//! configured threshold. Fetching is left to the caller.

use std::fmt;

use chrono::{DateTime, Utc};
use common::config::StrategyConfig;
use common::text::truncate_chars;
use common::{Article, MarketInfo, Side, Suggestion};
use serde::Serialize;
use tracing::debug;

use crate::probability::{est_yes_prob, side_edges};
use crate::sentiment::{sentiment_score, SentimentAnalyzer};

/// Title fragments removed before a title is used as a news query.
const QUERY_STRIP: [&str; 3] = ["Will ", "?", " happen"];

/// Why a market produced no suggestion.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// YES bid at or beyond the saturated extremes.
    ExtremePrice { yes_bid: i64 },
    /// Title-derived query too short to search on.
    QueryTooShort { query: String },
    /// The news lookup failed.
    NewsUnavailable,
    /// Fewer articles than the minimum needed to score.
    TooFewArticles { count: usize },
    /// Neither side cleared the edge threshold.
    NoEdge { edge_yes: f64, edge_no: f64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ExtremePrice { yes_bid } => write!(f, "price at extreme ({}¢)", yes_bid),
            SkipReason::QueryTooShort { query } => write!(f, "query too short ({:?})", query),
            SkipReason::NewsUnavailable => f.write_str("news unavailable"),
            SkipReason::TooFewArticles { count } => write!(f, "too few articles ({})", count),
            SkipReason::NoEdge { edge_yes, edge_no } => {
                write!(f, "no edge (yes={:+.3}, no={:+.3})", edge_yes, edge_no)
            }
        }
    }
}

/// Per-scan counters, for logging and the dashboard footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub markets_fetched: usize,
    pub markets_considered: usize,
    pub skipped_extreme_price: usize,
    pub skipped_short_query: usize,
    pub skipped_news_unavailable: usize,
    pub skipped_few_articles: usize,
    pub scored: usize,
    pub no_edge: usize,
}

impl ScanStats {
    pub fn record_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::ExtremePrice { .. } => self.skipped_extreme_price += 1,
            SkipReason::QueryTooShort { .. } => self.skipped_short_query += 1,
            SkipReason::NewsUnavailable => self.skipped_news_unavailable += 1,
            SkipReason::TooFewArticles { .. } => self.skipped_few_articles += 1,
            SkipReason::NoEdge { .. } => {
                self.scored += 1;
                self.no_edge += 1;
            }
        }
    }

    pub fn record_suggestion(&mut self) {
        self.scored += 1;
    }
}

/// Result of one full refresh cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Ranked and truncated suggestions.
    pub suggestions: Vec<Suggestion>,
    /// Suggestions found before truncation.
    pub total_found: usize,
    pub stats: ScanStats,
    pub refreshed_at: DateTime<Utc>,
}

/// Stateless edge detector.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    pub config: StrategyConfig,
    analyzer: SentimentAnalyzer,
}

impl StrategyEngine {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            analyzer: SentimentAnalyzer::new(),
        }
    }

    /// Check price bounds and derive the news query for `market`.
    pub fn prefilter(&self, market: &MarketInfo) -> Result<String, SkipReason> {
        let yes = market.yes_price();
        if yes <= self.config.min_price || yes >= self.config.max_price {
            return Err(SkipReason::ExtremePrice {
                yes_bid: market.yes_bid,
            });
        }

        let query = build_query(&market.title, self.config.max_query_chars);
        if query.chars().count() < self.config.min_query_chars {
            return Err(SkipReason::QueryTooShort { query });
        }

        Ok(query)
    }

    /// Score `articles` against `market` and emit a suggestion if either side
    /// clears the threshold. YES is checked first.
    pub fn evaluate(
        &self,
        market: &MarketInfo,
        articles: &[Article],
    ) -> Result<Suggestion, SkipReason> {
        if articles.len() < self.config.min_articles {
            return Err(SkipReason::TooFewArticles {
                count: articles.len(),
            });
        }

        let sentiment = sentiment_score(&self.analyzer, articles);
        let est = est_yes_prob(sentiment);
        self.suggest(market, sentiment, est)
    }

    fn suggest(
        &self,
        market: &MarketInfo,
        sentiment: f64,
        est: f64,
    ) -> Result<Suggestion, SkipReason> {
        let yes = market.yes_price();
        let (edge_yes, edge_no) = side_edges(est, yes);

        debug!(
            "{}: sentiment={:.3}, est={:.3}, yes={:.2}, edge_yes={:+.3}, edge_no={:+.3}",
            market.ticker, sentiment, est, yes, edge_yes, edge_no
        );

        let (side, market_prob, est_prob, edge) = if edge_yes > self.config.edge_threshold {
            (Side::Yes, yes, est, edge_yes)
        } else if edge_no > self.config.edge_threshold {
            (Side::No, 1.0 - yes, 1.0 - est, edge_no)
        } else {
            return Err(SkipReason::NoEdge { edge_yes, edge_no });
        };

        Ok(Suggestion {
            side,
            ticker: market.ticker.clone(),
            title: market.title.clone(),
            market_prob,
            est_prob,
            edge,
            sentiment,
        })
    }

    /// Sort by edge, largest first, and keep the top `max_suggestions`.
    pub fn rank(&self, mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        suggestions.sort_by(|a, b| b.edge.total_cmp(&a.edge));
        suggestions.truncate(self.config.max_suggestions);
        suggestions
    }
}

/// Strip question phrasing from a market title and cap its length.
pub fn build_query(title: &str, max_chars: usize) -> String {
    let mut query = title.to_string();
    for fragment in QUERY_STRIP {
        query = query.replace(fragment, "");
    }
    truncate_chars(query.trim(), max_chars).to_string()
}
