use crate::config::{ModelBackend, ModelConfig};
use crate::error::Result;
use crate::sources::{http_client, read_json, ScoringModel};
use crate::types::{ScoringRequest, ScoringResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Scoring model reached over HTTP with a bearer token.
pub struct HttpScoringModel {
    client: Client,
    backend: ModelBackend,
    url: String,
    api_key: String,
}

impl HttpScoringModel {
    /// Build a client for the configured backend. Returns None, with a
    /// warning, when the URL or key is missing; callers then fall back to
    /// holding.
    pub fn from_config(config: &ModelConfig) -> Option<Self> {
        if !config.is_configured() {
            let (url_var, key_var) = config.backend.env_keys();
            warn!(
                "Model API URL or key not configured ({} / {}), decisions will default to hold",
                url_var, key_var
            );
            return None;
        }

        Some(Self {
            client: http_client(Duration::from_secs(config.timeout_secs)),
            backend: config.backend,
            url: config.api_url.clone().unwrap_or_default(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    pub fn backend(&self) -> ModelBackend {
        self.backend
    }
}

#[async_trait]
impl ScoringModel for HttpScoringModel {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoringResponse> {
        debug!("Calling {} scoring model at {}", self.backend.as_str(), self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let body: Value = read_json("Model", response).await?;
        Ok(ScoringResponse::from_json(body))
    }
}
