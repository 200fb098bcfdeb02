//! Normalization of scoring model output into a [`Decision`].

use crate::types::{Decision, DecisionLabel, ScoringResponse};

/// Turn whatever the scoring model returned into a canonical decision.
///
/// A missing response, an unrecognized shape, or a label outside
/// buy/sell/hold all yield [`Decision::HOLD`]. Confidence is clamped to
/// `[0, 1]`, and a missing or NaN confidence becomes 0.
/// This never fails.
pub fn normalize(response: Option<&ScoringResponse>) -> Decision {
    let Some(response) = response else {
        return Decision::HOLD;
    };

    let (label, score) = response.parts();
    let Some(label) = label.and_then(DecisionLabel::from_str) else {
        return Decision::HOLD;
    };

    Decision {
        label,
        confidence: clamp_confidence(score),
    }
}

fn clamp_confidence(score: Option<f64>) -> f64 {
    match score {
        Some(value) if !value.is_nan() => value.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from(value: serde_json::Value) -> Decision {
        normalize(Some(&ScoringResponse::from_json(value)))
    }

    #[test]
    fn test_missing_response_holds() {
        assert_eq!(normalize(None), Decision::HOLD);
    }

    #[test]
    fn test_malformed_responses_hold() {
        assert_eq!(from(json!(null)), Decision::HOLD);
        assert_eq!(from(json!("buy")), Decision::HOLD);
        assert_eq!(from(json!({"result": "buy"})), Decision::HOLD);
        assert_eq!(from(json!({"data": {"label": null, "score": 0.9}})), Decision::HOLD);
    }

    #[test]
    fn test_unknown_label_holds_with_zero_confidence() {
        assert_eq!(from(json!({"action": "moon", "confidence": 0.99})), Decision::HOLD);
    }

    #[test]
    fn test_action_without_confidence() {
        let decision = from(json!({"action": "buy"}));
        assert_eq!(decision.label, DecisionLabel::Buy);
        assert_eq!(decision.confidence, 0.0);
    }

    #[test]
    fn test_signal_field() {
        let decision = from(json!({"signal": "SELL", "confidence": 0.4}));
        assert_eq!(decision.label, DecisionLabel::Sell);
        assert_eq!(decision.confidence, 0.4);
    }

    #[test]
    fn test_labeled_data() {
        let decision = from(json!({"data": {"label": "hold", "score": 0.65}}));
        assert_eq!(decision.label, DecisionLabel::Hold);
        assert_eq!(decision.confidence, 0.65);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(from(json!({"action": "buy", "confidence": 7.5})).confidence, 1.0);
        assert_eq!(from(json!({"action": "buy", "confidence": -2})).confidence, 0.0);
        assert_eq!(clamp_confidence(Some(f64::NAN)), 0.0);
        assert_eq!(clamp_confidence(Some(f64::INFINITY)), 1.0);
    }

    #[test]
    fn test_normalize_is_repeatable() {
        let response = ScoringResponse::from_json(json!({"signal": "buy", "score": 0.3}));
        assert_eq!(normalize(Some(&response)), normalize(Some(&response)));
    }
}
