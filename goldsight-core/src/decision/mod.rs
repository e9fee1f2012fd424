//! Trade decision engine — confidence gate plus bias branch.
//!
//! Combines the current price, volatility (ATR), a directional bias, and the
//! confirmation score into a gated trade setup. The bracket geometry is a
//! fixed design constant: stop at 1.2 ATR, target at 2.5 ATR, giving a
//! reward:risk of 2.5/1.2 (~2.08:1) whenever a signal fires.

pub mod sizing;

use crate::domain::{Bar, Bias, SetupStatus, TradeSetup};
use crate::scoring::ConfirmationScorer;

/// Stop distance in ATR multiples.
pub const STOP_ATR_MULT: f64 = 1.2;

/// Target distance in ATR multiples.
pub const TARGET_ATR_MULT: f64 = 2.5;

/// Default minimum confirmation confidence for a setup to pass the gate.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 50.0;

/// Evaluate a trade setup.
///
/// When `window` is supplied, the confirmation scorer runs over it and the
/// gate rejects anything below `min_confidence` with a WAIT, regardless of
/// bias. When `window` is `None`, the confidence reads 0 **and the gate is
/// skipped entirely** — the caller gets a directional setup with zero
/// confidence. Longstanding caller-facing behavior; kept as-is.
pub fn decide(
    price: f64,
    atr: f64,
    bias: Bias,
    window: Option<&[Bar]>,
    min_confidence: f64,
) -> TradeSetup {
    let confidence = match window {
        Some(bars) => ConfirmationScorer::default().score(bars),
        None => 0.0,
    };

    if window.is_some() && confidence < min_confidence {
        return TradeSetup::flat(
            SetupStatus::Wait,
            confidence,
            format!("Low confidence ({confidence}% < {min_confidence}%)"),
        );
    }

    match bias {
        Bias::Bullish => directional(SetupStatus::Buy, price, atr, confidence),
        Bias::Bearish => directional(SetupStatus::Sell, price, atr, confidence),
        Bias::Neutral => TradeSetup::flat(
            SetupStatus::Neutral,
            0.0,
            format!("{} signal with 0% confidence", SetupStatus::Neutral),
        ),
    }
}

fn directional(status: SetupStatus, price: f64, atr: f64, confidence: f64) -> TradeSetup {
    let (stop_loss, take_profit) = match status {
        SetupStatus::Buy => (price - STOP_ATR_MULT * atr, price + TARGET_ATR_MULT * atr),
        SetupStatus::Sell => (price + STOP_ATR_MULT * atr, price - TARGET_ATR_MULT * atr),
        _ => unreachable!("directional setups are BUY or SELL"),
    };
    TradeSetup {
        entry: Some(price),
        stop_loss: Some(stop_loss),
        take_profit: Some(take_profit),
        confidence,
        status,
        reason: format!("{status} signal with {confidence}% confidence"),
    }
}
