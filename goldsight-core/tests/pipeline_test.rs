//! End-to-end pipeline over a synthetic series: indicators, score,
//! classifier probability, decision.

mod common;

use common::{make_bars, wavy_closes};
use goldsight_core::classifier::{train, ForestConfig};
use goldsight_core::decision::{decide, DEFAULT_MIN_CONFIDENCE};
use goldsight_core::domain::{Bias, SetupStatus};
use goldsight_core::indicators::IndicatorSet;
use goldsight_core::scoring::ConfirmationScorer;

#[test]
fn full_evaluation_cycle() {
    let bars = make_bars(&wavy_closes(300));
    let indicators = IndicatorSet::standard(&bars);

    // Indicators: warm columns at the last bar.
    let last = bars.len() - 1;
    let atr = indicators.get("atr_14", last).expect("warm atr");
    assert!(atr > 0.0);

    // Score: bounded confidence.
    let score = ConfirmationScorer::default().score(&bars);
    assert!((0.0..=100.0).contains(&score));

    // Classifier: seeded forest, probability in the unit interval.
    let config = ForestConfig {
        n_trees: 25,
        ..ForestConfig::default()
    };
    let model = train(&bars, &indicators, config).unwrap();
    let row = model.latest_feature_row(&bars, &indicators).unwrap();
    let probability = model.predict_probability(&row);
    assert!((0.0..=1.0).contains(&probability));

    // Decision: bias from the probability, bracket from price and ATR.
    let bias = Bias::from_probability(probability);
    let price = bars[last].close;
    let setup = decide(price, atr, bias, Some(&bars), DEFAULT_MIN_CONFIDENCE);

    match setup.status {
        SetupStatus::Buy => {
            assert!(setup.stop_loss.unwrap() < price);
            assert!(setup.take_profit.unwrap() > price);
        }
        SetupStatus::Sell => {
            assert!(setup.stop_loss.unwrap() > price);
            assert!(setup.take_profit.unwrap() < price);
        }
        SetupStatus::Wait | SetupStatus::Neutral => {
            assert!(setup.entry.is_none());
        }
    }
    assert!(!setup.reason.is_empty());
}

#[test]
fn pipeline_is_deterministic_end_to_end() {
    let bars = make_bars(&wavy_closes(300));
    let indicators = IndicatorSet::standard(&bars);
    let config = ForestConfig {
        n_trees: 25,
        ..ForestConfig::default()
    };

    let run = || {
        let model = train(&bars, &indicators, config).unwrap();
        let row = model.latest_feature_row(&bars, &indicators).unwrap();
        model.predict_probability(&row)
    };
    assert_eq!(run(), run());
}
