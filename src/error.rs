use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Instrument {instrument} failed: {reason}")]
    InstrumentFailed { instrument: String, reason: String },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit status for this error: 2 for bad configuration or
    /// arguments, 1 for everything else.
    pub fn exit_status(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::InvalidInput(_) => 2,
            _ => 1,
        }
    }
}

impl From<&AppError> for ExitCode {
    fn from(err: &AppError) -> Self {
        ExitCode::from(err.exit_status())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
