use crate::config::{NewsConfig, NewsProvider};
use crate::error::Result;
use crate::sources::{http_client, read_json, NewsFeed};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CRYPTONEWS_API_URL: &str = "https://cryptonews-api.com/api/v1/category";
const CRYPTOCONTROL_API_URL: &str = "https://cryptocontrol.io/api/v1/public/news";

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
}

/// cryptonews-api.com wraps its articles in `data`.
#[derive(Debug, Deserialize)]
struct CryptoNewsResponse {
    #[serde(default)]
    data: Vec<Article>,
}

/// Headline client for the configured news provider.
pub struct NewsClient {
    client: Client,
    provider: NewsProvider,
    api_key: Option<String>,
}

impl NewsClient {
    pub fn new(config: &NewsConfig, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            provider: config.provider,
            api_key: config.api_key.clone(),
        }
    }

    async fn fetch_cryptonews(&self, key: &str, limit: usize) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(CRYPTONEWS_API_URL)
            .query(&[
                ("section", "general".to_string()),
                ("items", limit.to_string()),
                ("apiKey", key.to_string()),
            ])
            .send()
            .await?;

        let body: CryptoNewsResponse = read_json("CryptoNews", response).await?;
        Ok(body.data)
    }

    async fn fetch_cryptocontrol(&self, key: &str, limit: usize) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(CRYPTOCONTROL_API_URL)
            .header("x-api-key", key)
            .query(&[
                ("latest", "true".to_string()),
                ("page", "0".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        read_json("CryptoControl", response).await
    }
}

#[async_trait]
impl NewsFeed for NewsClient {
    /// Without an API key this returns no headlines and makes no request.
    async fn headlines(&self, limit: usize) -> Result<Vec<String>> {
        let Some(ref key) = self.api_key else {
            debug!("No news API key configured, skipping headlines");
            return Ok(Vec::new());
        };

        let articles = match self.provider {
            NewsProvider::CryptoNews => self.fetch_cryptonews(key, limit).await?,
            NewsProvider::CryptoControl => self.fetch_cryptocontrol(key, limit).await?,
        };

        Ok(titles(articles, limit))
    }
}

/// Non-blank titles, at most `limit` of them.
fn titles(articles: Vec<Article>, limit: usize) -> Vec<String> {
    articles
        .into_iter()
        .filter_map(|a| a.title)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .take(limit)
        .collect()
}
