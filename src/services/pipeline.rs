//! Per-instrument orchestration: prices and news in, analysis results out.

use crate::config::{Config, FailurePolicy};
use crate::error::{AppError, Result};
use crate::services::decision::normalize;
use crate::services::levels::compute_levels;
use crate::services::report;
use crate::services::signals::{compute_indicators, Rsi};
use crate::sources::{
    CoinGeckoClient, HttpScoringModel, NewsClient, NewsFeed, Notifier, PriceFeed, ScoringModel,
    TelegramNotifier,
};
use crate::types::{AnalysisResult, Decision, InstrumentOutcome, RunReport, ScoringRequest};
use futures_util::future::{join_all, try_join_all};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub currency: String,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
    pub ma_window: usize,
    pub rsi_period: usize,
    pub history_days: u32,
    pub news_limit: usize,
    /// Bound on fetching and analyzing a single instrument.
    pub instrument_timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            take_profit_pct: config.take_profit_pct,
            stop_loss_pct: config.stop_loss_pct,
            ma_window: config.ma_window,
            rsi_period: config.rsi_period,
            history_days: config.history_days,
            news_limit: config.news.limit,
            instrument_timeout: Duration::from_secs(config.instrument_timeout_secs),
            failure_policy: config.failure_policy,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Runs the analysis for a list of instruments against injected collaborators.
pub struct PipelineCoordinator {
    prices: Arc<dyn PriceFeed>,
    news: Arc<dyn NewsFeed>,
    model: Option<Arc<dyn ScoringModel>>,
    notifier: Option<Arc<dyn Notifier>>,
    settings: PipelineSettings,
}

impl PipelineCoordinator {
    /// Create a coordinator with no scoring model (every decision holds)
    /// and no notifier.
    pub fn new(
        prices: Arc<dyn PriceFeed>,
        news: Arc<dyn NewsFeed>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            prices,
            news,
            model: None,
            notifier: None,
            settings,
        }
    }

    pub fn with_model(mut self, model: Arc<dyn ScoringModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Wire up the HTTP collaborators described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let mut coordinator = Self::new(
            Arc::new(CoinGeckoClient::new(config.coingecko_api_key.clone(), timeout)),
            Arc::new(NewsClient::new(&config.news, timeout)),
            PipelineSettings::from(config),
        );

        if let Some(model) = HttpScoringModel::from_config(&config.model) {
            coordinator = coordinator.with_model(Arc::new(model));
        }

        if config.notify {
            if let Some(notifier) = TelegramNotifier::from_config(&config.telegram, timeout) {
                coordinator = coordinator.with_notifier(Arc::new(notifier));
            }
        }

        coordinator
    }

    /// Analyze every instrument and return outcomes in input order.
    ///
    /// Fails outright only when the batch price fetch fails, or when the
    /// failure policy is [`FailurePolicy::Abort`] and an instrument fails.
    pub async fn run(&self, instruments: &[String]) -> Result<RunReport> {
        let currency = &self.settings.currency;
        info!("Fetching market data for {:?} in {}", instruments, currency);

        let prices = self
            .prices
            .current_prices(instruments, currency)
            .await
            .map_err(|e| {
                error!("Error fetching market data: {}", e);
                e
            })?;

        let news = match self.news.headlines(self.settings.news_limit).await {
            Ok(headlines) => headlines,
            Err(e) => {
                warn!("Failed to fetch news: {}", e);
                Vec::new()
            }
        };
        if !news.is_empty() {
            debug!("Latest news headlines: {:?}", news);
        }

        let tasks = instruments
            .iter()
            .map(|instrument| self.analyze_bounded(instrument, &prices, &news));

        let outcomes = match self.settings.failure_policy {
            FailurePolicy::Continue => join_all(tasks).await,
            FailurePolicy::Abort => {
                try_join_all(tasks.map(|task| async move {
                    match task.await {
                        InstrumentOutcome::Failed { instrument, reason } => {
                            Err(AppError::InstrumentFailed { instrument, reason })
                        }
                        outcome => Ok(outcome),
                    }
                }))
                .await?
            }
        };

        let report = RunReport { outcomes, news };
        let actionable = report
            .results()
            .filter(|r| r.decision.label.is_actionable())
            .count();
        info!(
            "Run complete: {} analyzed, {} actionable",
            report.outcomes.len() - report.failures(),
            actionable
        );
        if report.failures() > 0 {
            warn!(
                "{} of {} instruments failed",
                report.failures(),
                report.outcomes.len()
            );
        }

        self.notify(&report).await;
        Ok(report)
    }

    /// Ask the scoring model for a decision. Any failure, or the absence of
    /// a model, resolves to [`Decision::HOLD`].
    pub async fn decide(&self, request: &ScoringRequest) -> Decision {
        let Some(ref model) = self.model else {
            return Decision::HOLD;
        };

        let response = match model.score(request).await {
            Ok(response) => Some(response),
            Err(e) => {
                warn!("Scoring model request failed: {}", e);
                None
            }
        };

        normalize(response.as_ref())
    }

    /// Send the report through the notifier, if any. Failures are logged only.
    pub async fn notify(&self, report: &RunReport) {
        let Some(ref notifier) = self.notifier else {
            return;
        };

        let message = report::format_notification(report);
        if let Err(e) = notifier.notify(&message).await {
            error!("Failed to send notification: {}", e);
        }
    }

    async fn analyze_bounded(
        &self,
        instrument: &str,
        prices: &HashMap<String, f64>,
        news: &[String],
    ) -> InstrumentOutcome {
        let timeout = self.settings.instrument_timeout;
        let price = prices.get(instrument).copied();

        let result = match tokio::time::timeout(timeout, self.analyze(instrument, price, news)).await
        {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(timeout)),
        };

        match result {
            Ok(result) => InstrumentOutcome::Analyzed(result),
            Err(e) => {
                warn!("Analysis failed for {}: {}", instrument, e);
                InstrumentOutcome::Failed {
                    instrument: instrument.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn analyze(
        &self,
        instrument: &str,
        price: Option<f64>,
        news: &[String],
    ) -> Result<AnalysisResult> {
        let settings = &self.settings;
        let currency = settings.currency.as_str();

        let price = price.ok_or_else(|| {
            AppError::ExternalApi(format!("no {} price returned for {}", currency, instrument))
        })?;
        if !price.is_finite() || price <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "price must be positive, got {}",
                price
            )));
        }

        let history = match self
            .prices
            .history(instrument, currency, settings.history_days)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                warn!("Failed to fetch historical prices for {}: {}", instrument, e);
                Vec::new()
            }
        };

        let rsi_min = Rsi::new(settings.rsi_period).min_periods();
        if history.len() < rsi_min {
            debug!(
                instrument,
                samples = history.len(),
                "Not enough history for RSI, need {}",
                rsi_min
            );
        }

        let indicators = compute_indicators(&history, settings.ma_window, settings.rsi_period);
        let request = ScoringRequest::market(instrument, currency, price, news, indicators);
        let decision = self.decide(&request).await;
        let levels = compute_levels(
            decision.label,
            price,
            settings.take_profit_pct,
            settings.stop_loss_pct,
        )?;

        info!(
            instrument,
            price,
            action = %decision.label,
            confidence = decision.confidence,
            take_profit = levels.take_profit,
            stop_loss = levels.stop_loss,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            instrument: instrument.to_string(),
            currency: currency.to_string(),
            price,
            indicators,
            decision,
            levels,
            analyzed_at: chrono::Utc::now(),
        })
    }
}
