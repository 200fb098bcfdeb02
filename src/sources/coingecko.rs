use crate::error::Result;
use crate::sources::{http_client, read_json, PriceFeed};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// `/simple/price` response: `{id: {currency: price}}`. Unknown coins are
/// omitted by the API and unpriced ones come back as null.
type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

/// `/coins/{id}/market_chart` response.
#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<[f64; 2]>, // [[timestamp_ms, price], ...]
}

/// CoinGecko REST client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client. The API key is optional and only
    /// raises rate limits.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header("Accept", "application/json");
        match self.api_key {
            Some(ref key) => request.header("x-cg-demo-api-key", key),
            None => request,
        }
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoClient {
    async fn current_prices(
        &self,
        instruments: &[String],
        currency: &str,
    ) -> Result<HashMap<String, f64>> {
        let url = format!("{}/simple/price", COINGECKO_API_URL);
        let ids = instruments.join(",");

        debug!("Fetching CoinGecko prices for {} in {}", ids, currency);

        let response = self
            .get(&url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", currency)])
            .send()
            .await?;

        let body: SimplePriceResponse = read_json("CoinGecko", response).await?;
        Ok(extract_prices(body, currency))
    }

    async fn history(&self, instrument: &str, currency: &str, days: u32) -> Result<Vec<f64>> {
        let url = format!("{}/coins/{}/market_chart", COINGECKO_API_URL, instrument);

        debug!("Fetching CoinGecko daily chart: {} days for {}", days, instrument);

        let response = self
            .get(&url)
            .query(&history_query(currency, days))
            .send()
            .await?;

        let chart: MarketChart = read_json("CoinGecko", response).await?;
        Ok(chart.prices.iter().map(|point| point[1]).collect())
    }
}

/// Query for `/market_chart`. Daily granularity keeps indicator windows in
/// days; without it CoinGecko returns hourly points for 2 to 90 days.
fn history_query(currency: &str, days: u32) -> [(&'static str, String); 3] {
    [
        ("vs_currency", currency.to_lowercase()),
        ("days", days.to_string()),
        ("interval", "daily".to_string()),
    ]
}

/// Pick out the price in `currency` for every coin that has one.
fn extract_prices(body: SimplePriceResponse, currency: &str) -> HashMap<String, f64> {
    let currency = currency.to_lowercase();
    body.into_iter()
        .filter_map(|(id, quotes)| quotes.get(&currency).copied().flatten().map(|p| (id, p)))
        .collect()
}
