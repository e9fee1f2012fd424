//! ClosedTrade — a completed round-trip recorded by the backtest harness.

use serde::{Deserialize, Serialize};

/// How a backtest position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitStatus {
    TpHit,
    SlHit,
}

/// A complete entry-to-exit trade from the backtest loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub entry: f64,
    pub exit: f64,
    /// Signed P&L in account currency at the harness's fixed lot size.
    pub profit: f64,
    /// Return on entry price, in percent.
    pub return_pct: f64,
    pub bars_held: usize,
    pub status: ExitStatus,
}

impl ClosedTrade {
    pub fn is_winner(&self) -> bool {
        self.profit > 0.0
    }
}
