//! REST client for the Kalshi API.
//!
//! Covers: open-market discovery. The markets endpoint is public, so
//! requests are unauthenticated.

use std::error::Error as StdError;
use std::time::Duration;

use common::text::summarize_body;
use common::{Error, MarketInfo, MarketsResponse};
use tracing::debug;

pub const MARKETS_PATH: &str = "/trade-api/v2/markets";

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn format_reqwest_error(err: &reqwest::Error) -> String {
    // Keep chained causes so network failures (DNS/TLS/socket) are visible.
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !cause_msg.is_empty() && !message.contains(&cause_msg) {
            message.push_str(": ");
            message.push_str(&cause_msg);
        }
        source = cause.source();
    }

    message
}

/// Async REST client for the Kalshi trade API.
#[derive(Debug, Clone)]
pub struct KalshiRestClient {
    client: reqwest::Client,
    base_url: String,
}

impl KalshiRestClient {
    /// Create a new REST client rooted at `base_url` (e.g. `https://api.elections.kalshi.com`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(Error::Config("Kalshi base URL must not be empty".into()));
        }

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .tcp_keepalive(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format_reqwest_error(&e)))?;

        Ok(Self { client, base_url })
    }

    /// URL helper.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full URL of the market listing; doubles as the market cache key.
    pub fn markets_endpoint(&self, status: Option<&str>, limit: u32) -> String {
        match status {
            Some(s) => format!("{}?status={}&limit={}", self.url(MARKETS_PATH), s, limit),
            None => format!("{}?limit={}", self.url(MARKETS_PATH), limit),
        }
    }

    /// Fetch a single page of markets.
    ///
    /// An empty `markets` array is returned as `Ok(vec![])`; any transport,
    /// status or decode failure is an `Err`.
    pub async fn get_markets(
        &self,
        status: Option<&str>,
        limit: u32,
    ) -> Result<Vec<MarketInfo>, Error> {
        let mut req = self.client.get(self.url(MARKETS_PATH));
        if let Some(s) = status {
            req = req.query(&[("status", s)]);
        }
        req = req.query(&[("limit", &limit.to_string())]);

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Http(format_reqwest_error(&e)))?;

        let status_code = resp.status().as_u16();
        if status_code != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::KalshiApi {
                status: status_code,
                message: summarize_body(&body, 800),
            });
        }

        let raw_body = resp
            .text()
            .await
            .map_err(|e| Error::Http(format_reqwest_error(&e)))?;
        let body = parse_markets(&raw_body)?;

        debug!("Fetched {} markets", body.markets.len());

        Ok(body.markets)
    }
}

fn parse_markets(raw_body: &str) -> Result<MarketsResponse, Error> {
    serde_json::from_str(raw_body).map_err(|e| {
        Error::Http(format!(
            "Error decoding markets response: {}; body={}",
            e,
            summarize_body(raw_body, 800)
        ))
    })
}
