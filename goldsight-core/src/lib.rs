//! GoldSight Core — signal pipeline for spot gold (XAU/USD).
//!
//! This crate contains the full evaluation pipeline:
//! - Domain types (bars, series, biases, setups, trades)
//! - Indicator engine (causal transforms over a bar series)
//! - Confirmation scorer (weighted rule voting)
//! - Trade decision engine (ATR brackets behind a confidence gate)
//! - Direction classifier (seeded random forest)
//! - Backtest harness (bar-by-bar replay with percentage exits)
//! - Data providers (Twelve Data, CSV import) and TOML config

pub mod backtest;
pub mod classifier;
pub mod config;
pub mod data;
pub mod decision;
pub mod domain;
pub mod indicators;
pub mod scoring;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types shared across threads are
    /// Send + Sync. The CLI runs fetch and training on worker threads;
    /// if any type fails this check, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::Bias>();
        require_sync::<domain::Bias>();
        require_send::<domain::TradeSetup>();
        require_sync::<domain::TradeSetup>();
        require_send::<domain::ClosedTrade>();
        require_sync::<domain::ClosedTrade>();

        // Pipeline components
        require_send::<indicators::IndicatorSet>();
        require_sync::<indicators::IndicatorSet>();
        require_send::<scoring::ConfirmationScorer>();
        require_sync::<scoring::ConfirmationScorer>();
        require_send::<classifier::TrainedModel>();
        require_sync::<classifier::TrainedModel>();
        require_send::<backtest::PerformanceReport>();
        require_sync::<backtest::PerformanceReport>();
        require_send::<config::AppConfig>();
        require_sync::<config::AppConfig>();
    }
}
