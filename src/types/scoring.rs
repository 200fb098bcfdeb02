//! Wire types for the external scoring model.
//!
//! Model endpoints disagree on where they put the decision: some answer
//! `{"action": "buy"}`, others `{"signal": "sell"}`, and text classifiers
//! answer `{"data": {"label": "hold", "score": 0.4}}`. The raw JSON is
//! sorted into [`ScoringResponse`] here and interpreted only by the
//! decision adapter.

use crate::types::Indicators;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Payload sent to a scoring model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoringRequest {
    /// Market snapshot for one instrument plus recent headlines.
    Market {
        /// `{instrument: {currency: price}}`
        market_data: BTreeMap<String, BTreeMap<String, f64>>,
        news: Vec<String>,
        indicators: Indicators,
    },
    /// Free text to classify.
    Text { text: String, model: String },
}

impl ScoringRequest {
    pub fn market(
        instrument: &str,
        currency: &str,
        price: f64,
        news: &[String],
        indicators: Indicators,
    ) -> Self {
        let mut quote = BTreeMap::new();
        quote.insert(currency.to_string(), price);
        let mut market_data = BTreeMap::new();
        market_data.insert(instrument.to_string(), quote);

        Self::Market {
            market_data,
            news: news.to_vec(),
            indicators,
        }
    }

    pub fn text(text: &str, model: &str) -> Self {
        Self::Text {
            text: text.to_string(),
            model: model.to_string(),
        }
    }
}

/// A scoring model response, classified by the field that carries the decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringResponse {
    /// `{"data": {"label", "score"}}` or a top-level `label`.
    Labeled {
        label: Option<String>,
        score: Option<f64>,
    },
    /// `{"action": ...}`
    Action {
        action: String,
        confidence: Option<f64>,
    },
    /// `{"signal": ...}`
    Signal {
        signal: String,
        confidence: Option<f64>,
    },
    /// No recognizable decision field.
    Unrecognized(Value),
}

impl ScoringResponse {
    /// Classify a raw JSON body. Field precedence is `data.label`, `label`,
    /// `action`, then `signal`.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::Unrecognized(value);
        };

        if let Some(Value::Object(data)) = map.get("data") {
            if let Some(label) = string_field(data, "label") {
                return Self::Labeled {
                    label: Some(label),
                    score: score_field(data),
                };
            }
        }

        if let Some(label) = string_field(&map, "label") {
            return Self::Labeled {
                label: Some(label),
                score: score_field(&map),
            };
        }

        if let Some(action) = string_field(&map, "action") {
            return Self::Action {
                action,
                confidence: score_field(&map),
            };
        }

        if let Some(signal) = string_field(&map, "signal") {
            return Self::Signal {
                signal,
                confidence: score_field(&map),
            };
        }

        Self::Unrecognized(Value::Object(map))
    }

    /// The raw label and score carried by this response, if any.
    pub fn parts(&self) -> (Option<&str>, Option<f64>) {
        match self {
            Self::Labeled { label, score } => (label.as_deref(), *score),
            Self::Action { action, confidence } => (Some(action.as_str()), *confidence),
            Self::Signal { signal, confidence } => (Some(signal.as_str()), *confidence),
            Self::Unrecognized(_) => (None, None),
        }
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// `score` or `confidence`, as a number or a numeric string.
fn score_field(map: &Map<String, Value>) -> Option<f64> {
    ["score", "confidence"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
}
