//! Domain types shared across the bot.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Kalshi Market Types ───────────────────────────────────────────────

/// A Kalshi market as returned by GET /trade-api/v2/markets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInfo {
    pub ticker: String,
    #[serde(default)]
    pub event_ticker: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub yes_bid: i64,
    #[serde(default)]
    pub yes_ask: i64,
    #[serde(default)]
    pub no_bid: i64,
    #[serde(default)]
    pub no_ask: i64,
    #[serde(default)]
    pub last_price: i64,
    #[serde(default)]
    pub volume: i64,
    #[serde(default)]
    pub volume_24h: i64,
    #[serde(default)]
    pub open_interest: i64,
    #[serde(default)]
    pub close_time: Option<DateTime<Utc>>,
}

impl MarketInfo {
    /// Yes bid as a probability in [0, 1].
    pub fn yes_price(&self) -> f64 {
        self.yes_bid as f64 / 100.0
    }
}

/// Response from GET /trade-api/v2/markets.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketsResponse {
    #[serde(default)]
    pub markets: Vec<MarketInfo>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// ── News Types ────────────────────────────────────────────────────────

/// A single article from the NewsAPI `everything` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Article {
    /// Title, description and content joined by spaces, skipping absent or
    /// empty fields. `None` when nothing is left to score.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.title, &self.description, &self.content]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Successful response from the NewsAPI `everything` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "totalResults", default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Error body NewsAPI returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiErrorBody {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Suggestion Types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Yes => f.write_str("YES"),
            Side::No => f.write_str("NO"),
        }
    }
}

/// A flagged mispricing. Probabilities are relative to `side`: for a NO
/// suggestion `market_prob` is `1 - yes_price` and `est_prob` is `1 - est`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub side: Side,
    pub ticker: String,
    pub title: String,
    pub market_prob: f64,
    pub est_prob: f64,
    pub edge: f64,
    pub sentiment: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_missing_fields_default() {
        let raw = r#"{"ticker": "KXTEST-1", "title": "Will it rain?"}"#;
        let market: MarketInfo = serde_json::from_str(raw).expect("market should deserialize");
        assert_eq!(market.ticker, "KXTEST-1");
        assert_eq!(market.yes_bid, 0);
        assert_eq!(market.yes_price(), 0.0);
        assert!(market.close_time.is_none());
    }

    #[test]
    fn test_article_text_skips_empty_fields() {
        let article = Article {
            title: Some("Rates cut".into()),
            description: Some(String::new()),
            content: Some("Markets rally".into()),
            ..Default::default()
        };
        assert_eq!(article.text().as_deref(), Some("Rates cut Markets rally"));

        let blank = Article {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.text().is_none());
    }

    #[test]
    fn test_articles_response_with_nulls() {
        let raw = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"source": {"id": null, "name": "Wire"}, "title": "A", "description": null,
                 "content": null, "url": "https://example.com/a", "publishedAt": "2026-10-01T12:00:00Z"},
                {"title": null, "description": "B"}
            ]
        }"#;
        let parsed: ArticlesResponse = serde_json::from_str(raw).expect("response should deserialize");
        assert_eq!(parsed.total_results, 2);
        assert_eq!(parsed.articles.len(), 2);
        assert_eq!(parsed.articles[0].text().as_deref(), Some("A"));
        assert_eq!(parsed.articles[1].text().as_deref(), Some("B"));
        assert!(parsed.articles[0].published_at.is_some());
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Yes.to_string(), "YES");
        assert_eq!(Side::No.to_string(), "NO");
    }
}
