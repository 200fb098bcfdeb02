//! External collaborators: price data, news, the scoring model and
//! notifications.
//!
//! The pipeline only sees the traits below. Concrete HTTP clients live in
//! the submodules and are built from explicit configuration.

pub mod coingecko;
pub mod model;
pub mod news;
pub mod telegram;

pub use coingecko::CoinGeckoClient;
pub use model::HttpScoringModel;
pub use news::NewsClient;
pub use telegram::TelegramNotifier;

use crate::error::{AppError, Result};
use crate::types::{ScoringRequest, ScoringResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

const USER_AGENT: &str = "signalbot/0.1 (trading signal pipeline)";

/// Current and historical prices.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Current price of each instrument in `currency`. Instruments the
    /// provider does not know are left out of the map.
    async fn current_prices(
        &self,
        instruments: &[String],
        currency: &str,
    ) -> Result<HashMap<String, f64>>;

    /// Time-ascending prices covering the last `days` days.
    async fn history(&self, instrument: &str, currency: &str, days: u32) -> Result<Vec<f64>>;
}

/// Recent market headlines.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    async fn headlines(&self, limit: usize) -> Result<Vec<String>>;
}

/// External classifier producing a trading decision.
#[async_trait]
pub trait ScoringModel: Send + Sync {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoringResponse>;
}

/// Delivery channel for the run summary.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}

/// Shared HTTP client with our User-Agent and a request timeout.
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Decode a JSON body, turning non-2xx statuses into `ExternalApi` errors.
pub(crate) async fn read_json<T: DeserializeOwned>(source: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalApi(format!(
            "{} API error {}: {}",
            source,
            status,
            body.chars().take(200).collect::<String>()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::ExternalApi(format!("Failed to parse {} response: {}", source, e)))
}
