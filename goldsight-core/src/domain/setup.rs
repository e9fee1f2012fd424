//! TradeSetup — the decision engine's output record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a trade evaluation.
///
/// WAIT means the confidence gate rejected the setup; NEUTRAL means no
/// directional bias was present. Both carry no price levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupStatus {
    Buy,
    Sell,
    Wait,
    Neutral,
}

impl fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SetupStatus::Buy => "BUY",
            SetupStatus::Sell => "SELL",
            SetupStatus::Wait => "WAIT",
            SetupStatus::Neutral => "NEUTRAL",
        };
        f.write_str(label)
    }
}

/// A bounded trade recommendation, constructed fresh per evaluation and
/// immutable once returned. Price levels are absent when no signal fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    /// Confirmation confidence in [0, 100], 2-decimal precision.
    pub confidence: f64,
    pub status: SetupStatus,
    pub reason: String,
}

impl TradeSetup {
    /// A setup with no levels, used for WAIT and NEUTRAL outcomes.
    pub fn flat(status: SetupStatus, confidence: f64, reason: String) -> Self {
        Self {
            entry: None,
            stop_loss: None,
            take_profit: None,
            confidence,
            status,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_matches_wire_labels() {
        assert_eq!(SetupStatus::Buy.to_string(), "BUY");
        assert_eq!(SetupStatus::Sell.to_string(), "SELL");
        assert_eq!(SetupStatus::Wait.to_string(), "WAIT");
        assert_eq!(SetupStatus::Neutral.to_string(), "NEUTRAL");
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&SetupStatus::Buy).unwrap(),
            "\"BUY\""
        );
    }

    #[test]
    fn flat_setup_has_no_levels() {
        let setup = TradeSetup::flat(SetupStatus::Wait, 40.0, "Low confidence".into());
        assert!(setup.entry.is_none());
        assert!(setup.stop_loss.is_none());
        assert!(setup.take_profit.is_none());
    }

    #[test]
    fn setup_serialization_roundtrip() {
        let setup = TradeSetup {
            entry: Some(2000.0),
            stop_loss: Some(1988.0),
            take_profit: Some(2025.0),
            confidence: 66.67,
            status: SetupStatus::Buy,
            reason: "BUY signal with 66.67% confidence".into(),
        };
        let json = serde_json::to_string(&setup).unwrap();
        let deser: TradeSetup = serde_json::from_str(&json).unwrap();
        assert_eq!(setup, deser);
    }
}
