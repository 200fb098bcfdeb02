use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical trading action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecisionLabel {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl DecisionLabel {
    /// Parse a label, ignoring case and surrounding whitespace.
    /// Returns None for anything outside buy/sell/hold.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            "hold" => Some(Self::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
        }
    }

    /// Whether this label asks for a position to be opened.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Self::Hold)
    }
}

impl fmt::Display for DecisionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub label: DecisionLabel,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

impl Decision {
    /// The fail-safe decision used whenever the scoring model is absent,
    /// unreachable, or returns something unusable.
    pub const HOLD: Decision = Decision {
        label: DecisionLabel::Hold,
        confidence: 0.0,
    };
}

impl Default for Decision {
    fn default() -> Self {
        Self::HOLD
    }
}

/// Indicator values for one instrument. `None` means there was not enough
/// price history to compute the value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub moving_average: Option<f64>,
    pub rsi: Option<f64>,
}

/// Take-profit and stop-loss prices relative to a reference price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLevels {
    pub take_profit: f64,
    pub stop_loss: f64,
}
