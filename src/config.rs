use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;

/// Default instrument (CoinGecko coin id).
pub const DEFAULT_SYMBOL: &str = "bitcoin";
/// Default quote currency.
pub const DEFAULT_CURRENCY: &str = "usd";
/// Default take-profit fraction (2%).
pub const DEFAULT_TAKE_PROFIT_PCT: f64 = 0.02;
/// Default stop-loss fraction (1%).
pub const DEFAULT_STOP_LOSS_PCT: f64 = 0.01;
/// Days of daily closes to fetch. Enough for the default RSI period plus one.
pub const DEFAULT_HISTORY_DAYS: u32 = 15;

/// Headline source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsProvider {
    /// cryptonews-api.com
    #[default]
    CryptoNews,
    /// cryptocontrol.io
    CryptoControl,
}

impl NewsProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cryptonews" | "cryptonews-api" => Some(Self::CryptoNews),
            "cryptocontrol" => Some(Self::CryptoControl),
            _ => None,
        }
    }
}

/// Which scoring model endpoint to call. Each backend reads its own
/// URL/key pair from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelBackend {
    #[default]
    Default,
    OpenAi,
    HuggingFace,
}

impl ModelBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "openai" => Some(Self::OpenAi),
            "huggingface" | "hf" => Some(Self::HuggingFace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::OpenAi => "openai",
            Self::HuggingFace => "huggingface",
        }
    }

    /// Environment variable names holding (url, key) for this backend.
    pub fn env_keys(&self) -> (&'static str, &'static str) {
        match self {
            Self::Default => ("MODEL_API_URL", "MODEL_API_KEY"),
            Self::OpenAi => ("OPENAI_API_URL", "OPENAI_API_KEY"),
            Self::HuggingFace => ("HUGGINGFACE_API_URL", "HUGGINGFACE_API_KEY"),
        }
    }
}

/// What the pipeline does when one instrument fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and keep going.
    #[default]
    Continue,
    /// Fail the whole run.
    Abort,
}

/// News feed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsConfig {
    pub provider: NewsProvider,
    /// Without a key no headlines are fetched.
    pub api_key: Option<String>,
    /// Maximum number of headlines.
    pub limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            provider: NewsProvider::default(),
            api_key: None,
            limit: 5,
        }
    }
}

/// Scoring model configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub backend: ModelBackend,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            api_url: None,
            api_key: None,
            timeout_secs: 15,
        }
    }
}

impl ModelConfig {
    /// Resolve the URL/key pair for `backend`.
    pub fn from_lookup<F>(backend: ModelBackend, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (url_key, api_key) = backend.env_keys();
        Self {
            backend,
            api_url: non_empty(lookup(url_key)),
            api_key: non_empty(lookup(api_key)),
            timeout_secs: lookup("MODEL_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }

    /// Both URL and key are required to call the model.
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.api_key.is_some()
    }
}

/// Telegram notification configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl TelegramConfig {
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// CoinGecko coin ids to analyze.
    pub symbols: Vec<String>,
    /// Quote currency (e.g. usd, eur).
    pub currency: String,
    /// Take-profit fraction (0.02 = 2%).
    pub take_profit_pct: f64,
    /// Stop-loss fraction (0.01 = 1%).
    pub stop_loss_pct: f64,
    /// Moving average window in samples.
    pub ma_window: usize,
    /// RSI lookback in samples.
    pub rsi_period: usize,
    /// Days of history to request per instrument.
    pub history_days: u32,
    /// Timeout for price and news requests, in seconds.
    pub request_timeout_secs: u64,
    /// Upper bound on one instrument's analysis, in seconds.
    pub instrument_timeout_secs: u64,
    pub failure_policy: FailurePolicy,
    /// Extra log destination next to stderr.
    pub log_file: Option<PathBuf>,
    /// CoinGecko API key (optional, raises rate limits).
    pub coingecko_api_key: Option<String>,
    pub news: NewsConfig,
    pub model: ModelConfig,
    pub telegram: TelegramConfig,
    /// Send the run summary through the notifier.
    pub notify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: vec![DEFAULT_SYMBOL.to_string()],
            currency: DEFAULT_CURRENCY.to_string(),
            take_profit_pct: DEFAULT_TAKE_PROFIT_PCT,
            stop_loss_pct: DEFAULT_STOP_LOSS_PCT,
            ma_window: 7,
            rsi_period: 14,
            history_days: DEFAULT_HISTORY_DAYS,
            request_timeout_secs: 10,
            instrument_timeout_secs: 30,
            failure_policy: FailurePolicy::Continue,
            log_file: None,
            coingecko_api_key: None,
            news: NewsConfig::default(),
            model: ModelConfig::default(),
            telegram: TelegramConfig::default(),
            notify: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Unset or unparsable
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let symbols = lookup("SIGNALBOT_SYMBOLS")
            .map(|s| parse_symbols(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.symbols);

        let backend = lookup("MODEL_BACKEND")
            .and_then(|v| ModelBackend::from_str(&v))
            .unwrap_or_default();

        Self {
            symbols,
            currency: non_empty(lookup("SIGNALBOT_CURRENCY")).unwrap_or(defaults.currency),
            take_profit_pct: parse_or(&lookup, "TAKE_PROFIT_PCT", defaults.take_profit_pct),
            stop_loss_pct: parse_or(&lookup, "STOP_LOSS_PCT", defaults.stop_loss_pct),
            ma_window: parse_or(&lookup, "MA_WINDOW", defaults.ma_window),
            rsi_period: parse_or(&lookup, "RSI_PERIOD", defaults.rsi_period),
            history_days: parse_or(&lookup, "HISTORY_DAYS", defaults.history_days),
            request_timeout_secs: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            instrument_timeout_secs: parse_or(
                &lookup,
                "INSTRUMENT_TIMEOUT_SECS",
                defaults.instrument_timeout_secs,
            ),
            failure_policy: match lookup("FAIL_FAST").as_deref() {
                Some("true") | Some("1") => FailurePolicy::Abort,
                _ => FailurePolicy::Continue,
            },
            log_file: non_empty(lookup("SIGNALBOT_LOG_FILE")).map(PathBuf::from),
            coingecko_api_key: non_empty(lookup("COINGECKO_API_KEY")),
            news: NewsConfig {
                provider: lookup("NEWS_PROVIDER")
                    .and_then(|v| NewsProvider::from_str(&v))
                    .unwrap_or_default(),
                api_key: non_empty(lookup("NEWS_API_KEY")),
                limit: parse_or(&lookup, "NEWS_LIMIT", defaults.news.limit),
            },
            model: ModelConfig::from_lookup(backend, &lookup),
            telegram: TelegramConfig {
                bot_token: non_empty(lookup("TELEGRAM_BOT_TOKEN")),
                chat_id: non_empty(lookup("TELEGRAM_CHAT_ID")),
            },
            notify: lookup("SIGNALBOT_NOTIFY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.notify),
        }
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(AppError::Config("at least one symbol is required".into()));
        }
        if self.currency.trim().is_empty() {
            return Err(AppError::Config("currency must not be empty".into()));
        }
        for (name, pct) in [
            ("take-profit", self.take_profit_pct),
            ("stop-loss", self.stop_loss_pct),
        ] {
            if !pct.is_finite() || pct < 0.0 {
                return Err(AppError::Config(format!(
                    "{} percentage must be non-negative, got {}",
                    name, pct
                )));
            }
        }
        if self.ma_window == 0 {
            return Err(AppError::Config("moving average window must be positive".into()));
        }
        if self.rsi_period == 0 {
            return Err(AppError::Config("RSI period must be positive".into()));
        }
        if self.instrument_timeout_secs == 0 {
            return Err(AppError::Config("instrument timeout must be positive".into()));
        }
        Ok(())
    }
}

/// Split a comma-separated symbol list, dropping blanks.
pub fn parse_symbols(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert_eq!(config.symbols, vec!["bitcoin".to_string()]);
        assert_eq!(config.currency, "usd");
        assert_eq!(config.take_profit_pct, 0.02);
        assert_eq!(config.stop_loss_pct, 0.01);
        assert_eq!(config.ma_window, 7);
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.history_days, 15);
        assert!(config.history_days as usize >= config.ma_window.max(config.rsi_period + 1));
        assert_eq!(config.news.limit, 5);
        assert_eq!(config.model.timeout_secs, 15);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert!(!config.model.is_configured());
        assert!(!config.telegram.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("SIGNALBOT_SYMBOLS", "bitcoin, ethereum,,solana "),
            ("SIGNALBOT_CURRENCY", "eur"),
            ("TAKE_PROFIT_PCT", "0.03"),
            ("STOP_LOSS_PCT", "0.015"),
            ("RSI_PERIOD", "9"),
            ("NEWS_PROVIDER", "cryptocontrol"),
            ("NEWS_API_KEY", "news-key"),
            ("FAIL_FAST", "1"),
        ]));

        assert_eq!(config.symbols, vec!["bitcoin", "ethereum", "solana"]);
        assert_eq!(config.currency, "eur");
        assert_eq!(config.take_profit_pct, 0.03);
        assert_eq!(config.stop_loss_pct, 0.015);
        assert_eq!(config.rsi_period, 9);
        assert_eq!(config.news.provider, NewsProvider::CryptoControl);
        assert_eq!(config.news.api_key.as_deref(), Some("news-key"));
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("TAKE_PROFIT_PCT", "two percent"),
            ("MA_WINDOW", "-3"),
            ("SIGNALBOT_SYMBOLS", " , "),
        ]));

        assert_eq!(config.take_profit_pct, 0.02);
        assert_eq!(config.ma_window, 7);
        assert_eq!(config.symbols, vec!["bitcoin"]);
    }

    #[test]
    fn test_model_backend_env_keys() {
        let lookup = lookup_from(&[
            ("MODEL_API_URL", "https://model.example.com"),
            ("OPENAI_API_URL", "https://api.openai.example.com/v1"),
            ("OPENAI_API_KEY", "sk-test"),
        ]);

        let default = ModelConfig::from_lookup(ModelBackend::Default, &lookup);
        assert!(!default.is_configured(), "URL without key is not enough");

        let openai = ModelConfig::from_lookup(ModelBackend::OpenAi, &lookup);
        assert!(openai.is_configured());
        assert_eq!(openai.api_key.as_deref(), Some("sk-test"));

        let hf = ModelConfig::from_lookup(ModelBackend::HuggingFace, &lookup);
        assert!(!hf.is_configured());
    }

    #[test]
    fn test_model_backend_selection() {
        let config = Config::from_lookup(lookup_from(&[
            ("MODEL_BACKEND", "huggingface"),
            ("HUGGINGFACE_API_URL", "https://hf.example.com"),
            ("HUGGINGFACE_API_KEY", "hf-key"),
        ]));
        assert_eq!(config.model.backend, ModelBackend::HuggingFace);
        assert!(config.model.is_configured());
    }

    #[test]
    fn test_blank_credentials_are_unset() {
        let config = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "   "),
            ("TELEGRAM_CHAT_ID", "42"),
        ]));
        assert_eq!(config.telegram.bot_token, None);
        assert!(!config.telegram.is_configured());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.stop_loss_pct = -0.01;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = Config::default();
        config.symbols.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rsi_period = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!(parse_symbols("a,b"), vec!["a", "b"]);
        assert!(parse_symbols("").is_empty());
    }
}
