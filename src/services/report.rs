//! Plain-text rendering of a run. Prices are rounded to two decimals here
//! and nowhere else.

use crate::types::{AnalysisResult, InstrumentOutcome, RunReport};
use std::fmt::Write;

const SEPARATOR_WIDTH: usize = 40;

/// Format an optional value, showing `N/A` when it is missing.
pub fn format_optional(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Console output: one block per instrument.
pub fn format_console(report: &RunReport) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        match outcome {
            InstrumentOutcome::Analyzed(result) => write_result_block(&mut out, result),
            InstrumentOutcome::Failed { instrument, reason } => {
                let _ = writeln!(out, "{}: analysis failed ({})", instrument, reason);
            }
        }
        let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    }

    out
}

fn write_result_block(out: &mut String, result: &AnalysisResult) {
    let currency = result.currency.to_uppercase();
    let _ = writeln!(
        out,
        "{} price: {:.2} {}",
        result.instrument, result.price, currency
    );
    let _ = writeln!(
        out,
        "Moving average: {}",
        with_currency(result.indicators.moving_average, &currency)
    );
    let _ = writeln!(out, "RSI: {}", format_optional(result.indicators.rsi));
    let _ = writeln!(
        out,
        "Trade signal: {} (confidence {:.2})",
        result.decision.label, result.decision.confidence
    );
    let _ = writeln!(
        out,
        "Take-profit at: {:.2} {}, Stop-loss at: {:.2} {}",
        result.levels.take_profit, currency, result.levels.stop_loss, currency
    );
}

fn with_currency(value: Option<f64>, currency: &str) -> String {
    match value {
        Some(v) => format!("{:.2} {}", v, currency),
        None => "N/A".to_string(),
    }
}

/// Compact summary suitable for a chat message.
pub fn format_notification(report: &RunReport) -> String {
    let mut lines = vec!["Trading signals".to_string()];

    for outcome in &report.outcomes {
        match outcome {
            InstrumentOutcome::Analyzed(r) => lines.push(format!(
                "{} {:.2} {}: {} ({:.2}), TP {:.2}, SL {:.2}",
                r.instrument.to_uppercase(),
                r.price,
                r.currency,
                r.decision.label.as_str().to_uppercase(),
                r.decision.confidence,
                r.levels.take_profit,
                r.levels.stop_loss
            )),
            InstrumentOutcome::Failed { instrument, reason } => {
                lines.push(format!("{}: failed ({})", instrument.to_uppercase(), reason))
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Decision, DecisionLabel, Indicators, TradeLevels};
    use chrono::Utc;

    fn report() -> RunReport {
        RunReport {
            outcomes: vec![
                InstrumentOutcome::Analyzed(AnalysisResult {
                    instrument: "bitcoin".to_string(),
                    currency: "usd".to_string(),
                    price: 100.0,
                    indicators: Indicators {
                        moving_average: Some(98.456),
                        rsi: None,
                    },
                    decision: Decision {
                        label: DecisionLabel::Buy,
                        confidence: 0.8,
                    },
                    levels: TradeLevels {
                        take_profit: 102.0,
                        stop_loss: 99.0,
                    },
                    analyzed_at: Utc::now(),
                }),
                InstrumentOutcome::Failed {
                    instrument: "dogecoin".to_string(),
                    reason: "no usd price returned".to_string(),
                },
            ],
            news: vec![],
        }
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(1.005)), "1.00");
        assert_eq!(format_optional(Some(72.7272)), "72.73");
        assert_eq!(format_optional(None), "N/A");
    }

    #[test]
    fn test_console_output() {
        let text = format_console(&report());
        assert!(text.contains("bitcoin price: 100.00 USD"));
        assert!(text.contains("Moving average: 98.46 USD"));
        assert!(text.contains("RSI: N/A"));
        assert!(text.contains("Trade signal: buy (confidence 0.80)"));
        assert!(text.contains("Take-profit at: 102.00 USD, Stop-loss at: 99.00 USD"));
        assert!(text.contains("dogecoin: analysis failed (no usd price returned)"));
    }

    #[test]
    fn test_notification_output() {
        let text = format_notification(&report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Trading signals");
        assert_eq!(lines[1], "BITCOIN 100.00 usd: BUY (0.80), TP 102.00, SL 99.00");
        assert_eq!(lines[2], "DOGECOIN: failed (no usd price returned)");
    }
}
