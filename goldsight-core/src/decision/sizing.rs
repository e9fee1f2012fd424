//! Fixed-fraction risk sizing — a standalone utility, not wired into the
//! decision gate.
//!
//! Classic risk management: risk a fixed currency amount per trade with a
//! stop at 2x ATR and a 2:1 reward target.
//!
//! # Formula
//! ```text
//! stop      = entry - 2 * atr
//! risk      = entry - stop
//! target    = entry + 2 * risk
//! size      = risk_amount / |entry - stop|   (floored at MIN_LOT)
//! ```

/// Smallest tradeable lot.
pub const MIN_LOT: f64 = 0.01;

/// Stop distance in ATR multiples for the sizing plan.
pub const SIZING_STOP_ATR_MULT: f64 = 2.0;

/// Reward multiple of the risked distance.
pub const SIZING_REWARD_MULT: f64 = 2.0;

/// A long bracket plus position size for a fixed risk budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskPlan {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size: f64,
}

/// Build a long risk plan: ATR-multiple stop, 2:1 reward target, size by
/// fixed-fraction risk. Degenerate stop distances (zero ATR) fall back to
/// the minimum lot rather than dividing by zero.
pub fn plan_fixed_risk(entry: f64, atr: f64, risk_amount: f64) -> RiskPlan {
    let stop_loss = entry - SIZING_STOP_ATR_MULT * atr;
    let risk = entry - stop_loss;
    let take_profit = entry + SIZING_REWARD_MULT * risk;

    let distance = (entry - stop_loss).abs();
    let position_size = if distance > 0.0 && risk_amount > 0.0 {
        (risk_amount / distance).max(MIN_LOT)
    } else {
        MIN_LOT
    };

    RiskPlan {
        entry,
        stop_loss,
        take_profit,
        position_size,
    }
}

/// Position size alone: `risk_amount / |entry - stop_loss|`, floored at the
/// minimum lot.
pub fn position_size(risk_amount: f64, entry: f64, stop_loss: f64) -> f64 {
    let distance = (entry - stop_loss).abs();
    if distance > 0.0 && risk_amount > 0.0 {
        (risk_amount / distance).max(MIN_LOT)
    } else {
        MIN_LOT
    }
}
