//! NewsAPI client.
//!
//! Searches the `everything` endpoint for recent articles matching a
//! market-derived query and returns them in publish order.

use std::time::Duration;

use common::config::NewsConfig;
use common::text::{summarize_body, truncate_chars};
use common::{Article, ArticlesResponse, Error, NewsApiErrorBody};
use tracing::debug;
use url::Url;

/// NewsAPI client with connection pooling.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    page_size: u32,
    sort_by: String,
    max_query_chars: usize,
}

impl NewsClient {
    pub fn new(config: &NewsConfig, api_key: &str) -> Result<Self, Error> {
        let endpoint = Url::parse(config.base_url.trim())
            .map_err(|e| Error::Config(format!("invalid news base URL {}: {}", config.base_url, e)))?;

        let client = reqwest::Client::builder()
            .user_agent("news-edge-bot/0.1")
            .pool_max_idle_per_host(4)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Http(format!("failed to build news HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            page_size: config.page_size,
            sort_by: config.sort_by.clone(),
            max_query_chars: config.max_query_chars,
        })
    }

    /// The query actually sent, after length capping. Also the cache key.
    pub fn effective_query<'a>(&self, query: &'a str) -> &'a str {
        truncate_chars(query, self.max_query_chars)
    }

    /// Build the fully encoded request URL for `query`.
    pub fn request_url(&self, query: &str) -> Result<Url, Error> {
        let page_size = self.page_size.to_string();
        Url::parse_with_params(
            self.endpoint.as_str(),
            &[
                ("q", self.effective_query(query)),
                ("sortBy", self.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| Error::Config(format!("invalid news request URL: {e}")))
    }

    /// Fetch up to `page_size` recent articles for `query`.
    ///
    /// `Ok(vec![])` means NewsAPI answered with no articles; failures to reach
    /// it or error statuses are returned as `Err`.
    pub async fn fetch_articles(&self, query: &str) -> Result<Vec<Article>, Error> {
        let url = self.request_url(query)?;

        debug!("Fetching news for query: {:?}", self.effective_query(query));

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("news request failed for {:?}: {}", query, e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Http(format!("news body read failed for {:?}: {}", query, e)))?;

        if status != 200 {
            return Err(Error::NewsApi {
                status,
                message: error_message(&body),
            });
        }

        let articles = parse_articles(&body, self.page_size as usize)?;
        debug!("News returned {} articles", articles.len());
        Ok(articles)
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<NewsApiErrorBody>(body) {
        Ok(err) => match (err.code, err.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => summarize_body(body, 500),
        },
        Err(_) => summarize_body(body, 500),
    }
}

fn parse_articles(body: &str, page_size: usize) -> Result<Vec<Article>, Error> {
    let payload: ArticlesResponse = serde_json::from_str(body).map_err(|e| {
        Error::Http(format!(
            "news JSON parse error: {}; body={}",
            e,
            summarize_body(body, 500)
        ))
    })?;

    if payload.status == "error" {
        return Err(Error::NewsApi {
            status: 200,
            message: error_message(body),
        });
    }

    let mut articles = payload.articles;
    articles.truncate(page_size);
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NewsClient {
        NewsClient::new(&NewsConfig::default(), "test-key").expect("client should build")
    }

    #[test]
    fn test_request_url_params() {
        let url = client()
            .request_url("Fed cut rates & hike? 100%")
            .expect("url should build");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("newsapi.org"));
        assert_eq!(url.path(), "/v2/everything");
        assert!(pairs.contains(&("q".into(), "Fed cut rates & hike? 100%".into())));
        assert!(pairs.contains(&("sortBy".into(), "publishedAt".into())));
        assert!(pairs.contains(&("pageSize".into(), "15".into())));
        assert!(pairs.contains(&("apiKey".into(), "test-key".into())));
        // Reserved characters must not leak into the raw query string.
        let raw = url.query().unwrap_or_default();
        assert!(!raw.contains(' '));
        assert!(!raw.contains("& "));
        assert!(raw.contains("%26"));
    }

    #[test]
    fn test_request_url_truncates_query() {
        let long = "é".repeat(200);
        let url = client().request_url(&long).expect("url should build");
        let q = url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .expect("q param present");
        assert_eq!(q.chars().count(), 180);
    }

    #[test]
    fn test_parse_articles_caps_page_size() {
        let body = format!(
            r#"{{"status":"ok","totalResults":20,"articles":[{}]}}"#,
            vec![r#"{"title":"t"}"#; 20].join(",")
        );
        let articles = parse_articles(&body, 15).expect("body should parse");
        assert_eq!(articles.len(), 15);
    }

    #[test]
    fn test_parse_articles_empty_is_ok() {
        let articles =
            parse_articles(r#"{"status":"ok","totalResults":0,"articles":[]}"#, 15).expect("ok");
        assert!(articles.is_empty());
    }

    #[test]
    fn test_error_status_in_body() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        match parse_articles(body, 15) {
            Err(Error::NewsApi { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "apiKeyInvalid: Your API key is invalid.");
            }
            other => panic!("expected NewsApi error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("upstream timeout"), "upstream timeout");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let cfg = NewsConfig {
            base_url: "not a url".into(),
            ..NewsConfig::default()
        };
        assert!(NewsClient::new(&cfg, "k").is_err());
    }
}
