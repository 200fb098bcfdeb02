use crate::types::{Decision, Indicators, TradeLevels};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything computed for one instrument in one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub instrument: String,
    pub currency: String,
    /// Current price the levels were computed from.
    pub price: f64,
    pub indicators: Indicators,
    pub decision: Decision,
    pub levels: TradeLevels,
    pub analyzed_at: DateTime<Utc>,
}

/// Per-instrument outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InstrumentOutcome {
    Analyzed(AnalysisResult),
    Failed { instrument: String, reason: String },
}

impl InstrumentOutcome {
    pub fn instrument(&self) -> &str {
        match self {
            Self::Analyzed(result) => &result.instrument,
            Self::Failed { instrument, .. } => instrument,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Analyzed(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcomes of one pipeline run, in the order the instruments were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub outcomes: Vec<InstrumentOutcome>,
    /// Headlines handed to the scoring model.
    pub news: Vec<String>,
}

impl RunReport {
    /// Successful analyses only.
    pub fn results(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.outcomes.iter().filter_map(InstrumentOutcome::result)
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DecisionLabel;

    fn sample_result(instrument: &str) -> AnalysisResult {
        AnalysisResult {
            instrument: instrument.to_string(),
            currency: "usd".to_string(),
            price: 100.0,
            indicators: Indicators::default(),
            decision: Decision {
                label: DecisionLabel::Buy,
                confidence: 0.7,
            },
            levels: TradeLevels {
                take_profit: 102.0,
                stop_loss: 99.0,
            },
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport {
            outcomes: vec![
                InstrumentOutcome::Analyzed(sample_result("bitcoin")),
                InstrumentOutcome::Failed {
                    instrument: "dogecoin".to_string(),
                    reason: "no price".to_string(),
                },
            ],
            news: vec![],
        };

        assert_eq!(report.failures(), 1);
        assert_eq!(report.results().count(), 1);
        assert_eq!(report.outcomes[1].instrument(), "dogecoin");
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let failed = InstrumentOutcome::Failed {
            instrument: "ethereum".to_string(),
            reason: "timeout".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["instrument"], "ethereum");

        let analyzed = serde_json::to_value(InstrumentOutcome::Analyzed(sample_result("bitcoin")))
            .unwrap();
        assert_eq!(analyzed["status"], "analyzed");
        assert_eq!(analyzed["levels"]["takeProfit"], 102.0);
    }
}
