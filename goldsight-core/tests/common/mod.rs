//! Shared helpers for integration tests.

use chrono::{Duration, TimeZone, Utc};
use goldsight_core::domain::Bar;

/// Synthetic hourly bars from close prices: open = previous close, a one
/// dollar wick on each side, constant volume.
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Steady geometric uptrend, 0.4% per bar.
#[allow(dead_code)]
pub fn rising_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 2000.0 * 1.004_f64.powi(i as i32)).collect()
}

/// Gently oscillating series with a mild drift, for training data.
#[allow(dead_code)]
pub fn wavy_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 2000.0 + 15.0 * ((i as f64) * 0.3).sin() + i as f64 * 0.1)
        .collect()
}
