//! Command line definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use crate::config::{parse_symbols, Config, FailurePolicy, ModelBackend, ModelConfig};
use crate::error::Result;
use crate::logging;
use crate::services::report::format_console;
use crate::services::PipelineCoordinator;
use crate::types::ScoringRequest;

#[derive(Parser, Debug)]
#[command(
    name = "signalbot",
    about = "Trading signals with take-profit and stop-loss levels"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify free text with the configured model and print the decision
    AnalyzeText { text: String },
}

/// Overrides applied on top of the environment configuration.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Comma-separated CoinGecko ids (e.g. bitcoin,ethereum)
    #[arg(long)]
    pub symbols: Option<String>,
    /// Quote currency (e.g. usd, eur)
    #[arg(long)]
    pub currency: Option<String>,
    /// Take-profit fraction (0.02 for 2%)
    #[arg(long = "take-profit", visible_alias = "tp")]
    pub take_profit: Option<f64>,
    /// Stop-loss fraction (0.01 for 1%)
    #[arg(long = "stop-loss", visible_alias = "sl")]
    pub stop_loss: Option<f64>,
    /// Moving average window
    #[arg(long)]
    pub ma_window: Option<usize>,
    /// RSI period
    #[arg(long)]
    pub rsi_period: Option<usize>,
    /// Scoring backend: default, openai or huggingface
    #[arg(long, value_parser = parse_backend)]
    pub model: Option<ModelBackend>,
    /// Also write logs to this file
    #[arg(long)]
    pub logfile: Option<PathBuf>,
    /// Fail the run when any instrument fails
    #[arg(long)]
    pub fail_fast: bool,
    /// Send the Telegram summary even if SIGNALBOT_NOTIFY disables it
    #[arg(long, overrides_with = "no_notify")]
    pub notify: bool,
    /// Do not send the Telegram summary
    #[arg(long, overrides_with = "notify")]
    pub no_notify: bool,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_backend(s: &str) -> std::result::Result<ModelBackend, String> {
    ModelBackend::from_str(s).ok_or_else(|| format!("unknown model backend: {}", s))
}

impl RunArgs {
    /// Build the configuration from `lookup` (normally the environment)
    /// and overlay the flags that were given.
    pub fn to_config<F>(&self, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::from_lookup(&lookup);

        if let Some(ref symbols) = self.symbols {
            config.symbols = parse_symbols(symbols);
        }
        if let Some(ref currency) = self.currency {
            config.currency = currency.trim().to_string();
        }
        if let Some(pct) = self.take_profit {
            config.take_profit_pct = pct;
        }
        if let Some(pct) = self.stop_loss {
            config.stop_loss_pct = pct;
        }
        if let Some(window) = self.ma_window {
            config.ma_window = window;
        }
        if let Some(period) = self.rsi_period {
            config.rsi_period = period;
        }
        if let Some(backend) = self.model {
            config.model = ModelConfig::from_lookup(backend, &lookup);
        }
        if let Some(ref path) = self.logfile {
            config.log_file = Some(path.clone());
        }
        if self.fail_fast {
            config.failure_policy = FailurePolicy::Abort;
        }
        if self.notify {
            config.notify = true;
        }
        if self.no_notify {
            config.notify = false;
        }

        config
    }
}

pub async fn run(cli: Cli) -> ExitCode {
    let config = cli.run.to_config(|key| env::var(key).ok());

    if let Err(e) = logging::init(config.log_file.as_deref()) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        return (&e).into();
    }

    let result = match cli.command {
        Some(Command::AnalyzeText { ref text }) => run_analyze_text(&config, text).await,
        None => run_pipeline(&config, cli.run.json).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            (&e).into()
        }
    }
}

async fn run_pipeline(config: &Config, json: bool) -> Result<()> {
    let coordinator = PipelineCoordinator::from_config(config);
    let report = coordinator.run(&config.symbols).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_console(&report));
    }

    Ok(())
}

async fn run_analyze_text(config: &Config, text: &str) -> Result<()> {
    let coordinator = PipelineCoordinator::from_config(config);
    let request = ScoringRequest::text(text, config.model.backend.as_str());
    let decision = coordinator.decide(&request).await;

    info!(
        "Model {} classified text as {}",
        config.model.backend.as_str(),
        decision.label
    );
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
