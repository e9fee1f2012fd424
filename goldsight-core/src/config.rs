//! Application configuration.
//!
//! Loaded from a TOML file; every field has a default so a missing file or a
//! partial file still yields a runnable config. The API key is deliberately
//! not part of this struct — it comes from the `TD_API_KEY` environment
//! variable only.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown timeframe label: {0}")]
    UnknownTimeframe(String),
}

/// Pipeline-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Instrument symbol in the provider's notation.
    pub symbol: String,

    /// Timeframe label (see `interval()` for the accepted set).
    pub timeframe: String,

    /// Bars requested per fetch.
    pub output_size: usize,

    /// Confirmation gate threshold in percent.
    pub min_confidence: f64,

    /// Backtest starting balance.
    pub initial_balance: f64,

    /// Fraction of balance risked per trade.
    pub risk_per_trade: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: "XAU/USD".into(),
            timeframe: "1H".into(),
            output_size: 300,
            min_confidence: 50.0,
            initial_balance: 1000.0,
            risk_per_trade: 0.02,
        }
    }
}

/// Timeframe labels accepted in config, paired with the provider interval
/// each maps to.
pub const TIMEFRAMES: &[(&str, &str)] = &[
    ("1m", "1min"),
    ("5m", "5min"),
    ("15m", "15min"),
    ("30m", "30min"),
    ("1H", "1h"),
    ("4H", "4h"),
    ("1D", "1day"),
];

impl AppConfig {
    /// Load from a TOML file. Unset fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Map the configured timeframe label to the provider's interval string.
    pub fn interval(&self) -> Result<&'static str, ConfigError> {
        TIMEFRAMES
            .iter()
            .find(|(label, _)| *label == self.timeframe)
            .map(|(_, interval)| *interval)
            .ok_or_else(|| ConfigError::UnknownTimeframe(self.timeframe.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_profile() {
        let config = AppConfig::default();
        assert_eq!(config.symbol, "XAU/USD");
        assert_eq!(config.timeframe, "1H");
        assert_eq!(config.output_size, 300);
        assert_eq!(config.min_confidence, 50.0);
        assert_eq!(config.initial_balance, 1000.0);
        assert_eq!(config.risk_per_trade, 0.02);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("timeframe = \"4H\"\n").unwrap();
        assert_eq!(config.timeframe, "4H");
        assert_eq!(config.symbol, "XAU/USD");
        assert_eq!(config.output_size, 300);
    }

    #[test]
    fn interval_mapping() {
        for (label, interval) in [("1m", "1min"), ("30m", "30min"), ("1H", "1h"), ("1D", "1day")] {
            let config = AppConfig {
                timeframe: label.into(),
                ..AppConfig::default()
            };
            assert_eq!(config.interval().unwrap(), interval);
        }
    }

    #[test]
    fn unknown_timeframe_is_an_error() {
        let config = AppConfig {
            timeframe: "2W".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.interval(),
            Err(ConfigError::UnknownTimeframe(_))
        ));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
