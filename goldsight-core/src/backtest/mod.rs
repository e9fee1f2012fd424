//! Backtest harness — replays the confirmation pipeline bar-by-bar.
//!
//! Long-only, one position at a time. Entries open at the close of any bar
//! where the account is flat and the confirmation score clears the gate;
//! exits are percentage brackets on the close (+2% take-profit, -1% stop).
//! Fills are assumed at the close with no slippage or costs, so reported
//! figures are an upper bound on the signal's edge, not an execution claim.

use crate::domain::{Bar, ClosedTrade, ExitStatus};
use crate::indicators::IndicatorSet;
use crate::scoring::{round2, ConfirmationScorer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bars skipped before the first entry is considered, so every indicator
/// column is warm by the time the scorer votes.
pub const DEFAULT_WARMUP_BARS: usize = 50;

/// Take-profit threshold on close-to-close return.
pub const TAKE_PROFIT_PCT: f64 = 0.02;

/// Stop-loss threshold on close-to-close return.
pub const STOP_LOSS_PCT: f64 = -0.01;

/// Units bought per entry. Sizing by `risk_per_trade` is a planned
/// refinement; the harness currently books fixed lots.
pub const LOT_UNITS: f64 = 100.0;

#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("cannot backtest an empty series")]
    EmptySeries,
}

/// Harness parameters. `risk_per_trade` rides on the config surface for
/// callers that size externally; the loop itself books `LOT_UNITS` per trade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_balance: f64,
    pub risk_per_trade: f64,
    pub min_confidence: f64,
    pub warmup_bars: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_balance: 1000.0,
            risk_per_trade: 0.02,
            min_confidence: 50.0,
            warmup_bars: DEFAULT_WARMUP_BARS,
        }
    }
}

/// Aggregate results of one harness run. Monetary and percent aggregates are
/// rounded to 2 decimals; the trade list keeps full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub initial_balance: f64,
    pub final_balance: f64,
    pub total_profit: f64,
    pub return_pct: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub avg_profit_per_trade: f64,
    pub trades: Vec<ClosedTrade>,
}

struct OpenPosition {
    entry: f64,
    entry_index: usize,
}

/// Replay the pipeline over `bars`.
///
/// Indicator columns are computed once over the full series (every transform
/// is causal, so per-bar values match what a prefix recomputation would
/// give), then the scorer is evaluated per bar index. A trailing open
/// position at end of data is left unbooked. A series shorter than the
/// warm-up yields a zero-trade report, not an error.
pub fn run(bars: &[Bar], config: &BacktestConfig) -> Result<PerformanceReport, BacktestError> {
    if bars.is_empty() {
        return Err(BacktestError::EmptySeries);
    }

    let indicators = IndicatorSet::standard(bars);
    let scorer = ConfirmationScorer::default();

    let mut balance = config.initial_balance;
    let mut position: Option<OpenPosition> = None;
    let mut trades: Vec<ClosedTrade> = Vec::new();

    for i in config.warmup_bars..bars.len() {
        let close = bars[i].close;

        if let Some(open) = &position {
            let change = (close - open.entry) / open.entry;
            let status = if change > TAKE_PROFIT_PCT {
                Some(ExitStatus::TpHit)
            } else if change < STOP_LOSS_PCT {
                Some(ExitStatus::SlHit)
            } else {
                None
            };
            if let Some(status) = status {
                let profit = (close - open.entry) * LOT_UNITS;
                balance += profit;
                trades.push(ClosedTrade {
                    entry: open.entry,
                    exit: close,
                    profit,
                    return_pct: change * 100.0,
                    bars_held: i - open.entry_index,
                    status,
                });
                position = None;
            }
            continue;
        }

        let confidence = scorer.score_at(bars, &indicators, i);
        if confidence > config.min_confidence {
            position = Some(OpenPosition {
                entry: close,
                entry_index: i,
            });
        }
    }

    Ok(report(config.initial_balance, balance, trades))
}

fn report(initial_balance: f64, final_balance: f64, trades: Vec<ClosedTrade>) -> PerformanceReport {
    let total_trades = trades.len();
    let winning_trades = trades.iter().filter(|t| t.is_winner()).count();
    let losing_trades = total_trades - winning_trades;
    let total_profit = final_balance - initial_balance;

    let win_rate = if total_trades > 0 {
        winning_trades as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };
    let avg_profit = if total_trades > 0 {
        total_profit / total_trades as f64
    } else {
        0.0
    };
    let return_pct = if initial_balance > 0.0 {
        total_profit / initial_balance * 100.0
    } else {
        0.0
    };

    PerformanceReport {
        initial_balance,
        final_balance: round2(final_balance),
        total_profit: round2(total_profit),
        return_pct: round2(return_pct),
        total_trades,
        winning_trades,
        losing_trades,
        win_rate: round2(win_rate),
        avg_profit_per_trade: round2(avg_profit),
        trades,
    }
}
